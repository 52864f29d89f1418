use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use encoding_rs::{Encoding, UTF_8};
use tracing_subscriber::EnvFilter;

use abshtml::env::{logging, EnvVar};
use abshtml::{rewrite, AbshtmlConfig, AbshtmlError, AbshtmlResult};

const STDIN_TARGET: &str = "-";

/// Turns relative URLs in HTML into absolute ones without reformatting the markup
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// HTML file to read, "-" for standard input
    #[arg(default_value = STDIN_TARGET)]
    input: String,
    /// Absolute URL of the site root
    #[arg(short = 'u', long)]
    site_root: Option<String>,
    /// Path of the current item, used for document-relative URLs
    #[arg(short = 'p', long)]
    item_path: Option<String>,
    /// Only rewrite URLs containing the static image prefix
    #[arg(short, long)]
    assets_only: bool,
    /// Force https:// on produced URLs
    #[arg(short, long)]
    secure: bool,
    /// Static image URL prefix, required with --assets-only
    #[arg(short = 'P', long)]
    static_prefix: Option<String>,
    /// Element whose contents are never rewritten; repeatable, replaces the default "code"
    #[arg(short = 'x', long = "exclude", value_name = "TAG")]
    exclude: Vec<String>,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Character encoding of the input, also used for the output
    #[arg(short, long)]
    encoding: Option<String>,
    /// Write the result to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// More logging on standard error (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Print the supported environment variables and exit
    #[arg(long)]
    env_docs: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.env_docs {
        print!("{}", abshtml::env::generate_env_docs());
        return;
    }

    init_logging(cli.verbose);

    if let Err(error) = run(cli) {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "abshtml={}",
                logging::LogLevel::get_or_default("warn".to_string())
            ))
        }),
        1 => EnvFilter::new("abshtml=info"),
        2 => EnvFilter::new("abshtml=debug"),
        _ => EnvFilter::new("abshtml=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> AbshtmlResult<()> {
    let mut config = match &cli.config {
        Some(path) => AbshtmlConfig::from_file(path)?,
        None => AbshtmlConfig::default(),
    };
    config.apply_env_overrides()?;

    // Command-line flags take precedence over everything else
    if cli.site_root.is_some() {
        config.site_root = cli.site_root;
    }
    if cli.item_path.is_some() {
        config.item_path = cli.item_path;
    }
    if cli.assets_only {
        config.assets_only = true;
    }
    if cli.secure {
        config.secure = true;
    }
    if cli.static_prefix.is_some() {
        config.static_image_url_prefix = cli.static_prefix;
    }
    if !cli.exclude.is_empty() {
        config.excluded_elements = Some(cli.exclude);
    }

    let site_root = config.site_root.clone().ok_or(AbshtmlError::MissingSiteRoot)?;
    let item_path = config.item_path.clone().unwrap_or_default();
    let options = config.to_options();

    let encoding = match cli.encoding.as_deref() {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| AbshtmlError::UnknownEncoding(label.to_string()))?,
        None => UTF_8,
    };

    let input_data = read_input(&cli.input)?;
    let (markup, _, had_errors) = encoding.decode(&input_data);
    if had_errors {
        tracing::warn!("input is not valid {}, malformed sequences replaced", encoding.name());
    }

    let result = rewrite(&markup, &site_root, &item_path, &options)?;
    let (output_data, _, _) = encoding.encode(&result);

    write_output(cli.output.as_deref(), &output_data)
}

fn read_input(target: &str) -> AbshtmlResult<Vec<u8>> {
    let mut data = Vec::new();

    if target == STDIN_TARGET {
        io::stdin().read_to_end(&mut data)?;
    } else {
        data = fs::read(target)?;
        tracing::info!("read {} bytes from {}", data.len(), target);
    }

    Ok(data)
}

fn write_output(destination: Option<&Path>, data: &[u8]) -> AbshtmlResult<()> {
    match destination {
        Some(path) => {
            fs::write(path, data)?;
            tracing::info!("wrote {} bytes to {}", data.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
