//! Typed access to the environment variables abshtml understands.
//!
//! Each variable is a zero-sized type implementing [`EnvVar`], which keeps the
//! name, default, description and validation of a variable in one place.

use std::env;
use std::fmt;

/// Environment variable parse error
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// Accessor for a single environment variable
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// `Ok(None)` when the variable is unset, an error when it is set but invalid.
    fn get_opt() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// Logging variables
pub mod logging {
    use super::*;

    /// Log level used by the CLI when `--verbose` is absent
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "ABSHTML_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("warn".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// Variables overriding rewrite options
pub mod rewrite {
    use super::*;

    pub struct SiteRoot;
    impl EnvVar<String> for SiteRoot {
        const NAME: &'static str = "ABSHTML_SITE_ROOT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Absolute URL of the site root, e.g. https://example.com/blog/";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Site root must start with http:// or https://".to_string(),
                })
            }
        }
    }

    pub struct ItemPath;
    impl EnvVar<String> for ItemPath {
        const NAME: &'static str = "ABSHTML_ITEM_PATH";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Path of the current item, used for document-relative URLs";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    pub struct AssetsOnly;
    impl EnvVar<bool> for AssetsOnly {
        const NAME: &'static str = "ABSHTML_ASSETS_ONLY";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Only rewrite URLs containing the static image prefix";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    pub struct Secure;
    impl EnvVar<bool> for Secure {
        const NAME: &'static str = "ABSHTML_SECURE";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Force https:// on produced absolute URLs";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    pub struct StaticPrefix;
    impl EnvVar<String> for StaticPrefix {
        const NAME: &'static str = "ABSHTML_STATIC_PREFIX";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Static image URL prefix used in assets-only mode";

        fn parse(value: &str) -> EnvResult<String> {
            let prefix = value.trim();
            if prefix.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Prefix must not be empty".to_string(),
                });
            }
            Ok(prefix.to_string())
        }
    }
}

fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

/// Markdown list of every variable, its description and default
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    docs.push_str("## Logging\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        logging::LogLevel::NAME,
        logging::LogLevel::DESCRIPTION,
        logging::LogLevel::DEFAULT
    ));

    docs.push_str("\n## Rewriting\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        rewrite::SiteRoot::NAME,
        rewrite::SiteRoot::DESCRIPTION,
        rewrite::SiteRoot::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        rewrite::ItemPath::NAME,
        rewrite::ItemPath::DESCRIPTION,
        rewrite::ItemPath::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        rewrite::AssetsOnly::NAME,
        rewrite::AssetsOnly::DESCRIPTION,
        rewrite::AssetsOnly::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        rewrite::Secure::NAME,
        rewrite::Secure::DESCRIPTION,
        rewrite::Secure::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        rewrite::StaticPrefix::NAME,
        rewrite::StaticPrefix::DESCRIPTION,
        rewrite::StaticPrefix::DEFAULT
    ));

    docs
}
