//! Error type shared by the library and the CLI.

use thiserror::Error;

use crate::env::EnvError;

/// Everything that can go wrong while absolutizing a document.
///
/// The core itself prefers leaving markup untouched over failing; these
/// variants cover misconfiguration and collaborator failures only.
#[derive(Error, Debug)]
pub enum AbshtmlError {
    /// The site root could not be parsed as an absolute URL
    #[error("invalid site root URL '{url}': {source}")]
    InvalidSiteRoot {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A relative URL could not be joined onto the site root
    #[error("unable to resolve '{path}' against '{root}': {source}")]
    Resolve {
        path: String,
        root: String,
        #[source]
        source: url::ParseError,
    },

    /// `assets_only` was requested without a static prefix to look for
    #[error("assets-only mode requires a static image URL prefix")]
    MissingStaticPrefix,

    #[error("no site root given, use --site-root, ABSHTML_SITE_ROOT or site_root in the config file")]
    MissingSiteRoot,

    #[error("unknown character encoding '{0}'")]
    UnknownEncoding(String),

    /// A per-group attribute pattern failed to compile
    #[error("unable to build pattern for {key}: {source}")]
    Pattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type AbshtmlResult<T> = Result<T, AbshtmlError>;
