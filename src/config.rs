use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional TOML configuration for the browser core. Every field has a
/// default so a missing or unparsable file degrades to the built-in setup.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BrowserConfig {
    /// Override for the bundled catalog document.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Site base URL the community directory is fetched from. When unset the
    /// local `data/communities.json` file is used instead.
    #[serde(default)]
    pub directory_url: Option<String>,
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl BrowserConfig {
    /// Load config from a TOML file; missing or invalid files fall back to defaults.
    pub fn load(path: &Path) -> Self {
        let config = std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default();
        tracing::debug!(path = %path.display(), "loaded browser config");
        config
    }
}
