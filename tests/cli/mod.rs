
use assert_cmd::Command;

/// The binary with every `ABSHTML_*` variable cleared
pub fn command() -> Command {
    let mut command = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    for variable in [
        "ABSHTML_SITE_ROOT",
        "ABSHTML_ITEM_PATH",
        "ABSHTML_ASSETS_ONLY",
        "ABSHTML_SECURE",
        "ABSHTML_STATIC_PREFIX",
        "ABSHTML_LOG_LEVEL",
        "RUST_LOG",
    ] {
        command.env_remove(variable);
    }
    command
}
