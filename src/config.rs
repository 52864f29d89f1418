//! Configuration file support
//!
//! Settings come from, in increasing order of precedence: defaults, a TOML
//! file, `ABSHTML_*` environment variables, command-line flags (applied by
//! the binary).
//!
//! ```toml
//! site_root = "https://example.com/blog/"
//! assets_only = true
//! static_image_url_prefix = "content/images"
//! excluded_elements = ["code", "pre"]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::AbshtmlOptions;
use crate::env::{rewrite, EnvVar};
use crate::error::AbshtmlResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AbshtmlConfig {
    pub site_root: Option<String>,
    pub item_path: Option<String>,
    pub assets_only: bool,
    pub secure: bool,
    pub static_image_url_prefix: Option<String>,
    pub excluded_elements: Option<Vec<String>>,
}

impl AbshtmlConfig {
    pub fn from_toml_str(contents: &str) -> AbshtmlResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> AbshtmlResult<Self> {
        let contents = fs::read_to_string(path)?;
        tracing::info!("loaded configuration file: {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Overrides fields with any `ABSHTML_*` variable that is set
    ///
    /// A variable that is set but invalid is an error rather than ignored.
    pub fn apply_env_overrides(&mut self) -> AbshtmlResult<()> {
        if let Some(site_root) = rewrite::SiteRoot::get_opt()? {
            tracing::debug!("site root overridden by environment: {}", site_root);
            self.site_root = Some(site_root);
        }

        if let Some(item_path) = rewrite::ItemPath::get_opt()? {
            self.item_path = Some(item_path);
        }

        if let Some(assets_only) = rewrite::AssetsOnly::get_opt()? {
            self.assets_only = assets_only;
        }

        if let Some(secure) = rewrite::Secure::get_opt()? {
            self.secure = secure;
        }

        if let Some(prefix) = rewrite::StaticPrefix::get_opt()? {
            self.static_image_url_prefix = Some(prefix);
        }

        Ok(())
    }

    pub fn to_options(&self) -> AbshtmlOptions {
        let mut options = AbshtmlOptions {
            assets_only: self.assets_only,
            secure: self.secure,
            static_image_url_prefix: self.static_image_url_prefix.clone(),
            ..AbshtmlOptions::default()
        };

        if let Some(excluded_elements) = &self.excluded_elements {
            options.excluded_elements = excluded_elements.clone();
        }

        options
    }
}
