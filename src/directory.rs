use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Selection value meaning "no platform filtering applied".
pub const ALL_PLATFORMS: &str = "all";

/// Well-known path the directory document is served from.
pub const DIRECTORY_PATH: &str = "communities.json";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// The fetched list of developer communities grouped by platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directory {
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub communities: Vec<Community>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    pub name: String,
    pub members: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub activity: String,
    pub link: String,
}

/// Outcome of the one directory load. `Unavailable` is distinct from a
/// `Ready` directory with zero platforms; the view renders them differently.
#[derive(Debug, Clone)]
pub enum DirectoryState {
    Ready(Directory),
    Unavailable(String),
}

impl DirectoryState {
    pub fn is_ready(&self) -> bool {
        matches!(self, DirectoryState::Ready(_))
    }
}

/// Derive the visible platform subset for a selection. The "all" sentinel
/// returns every platform in original order; otherwise names are matched
/// case-insensitively, yielding zero or more entries and never an error.
pub fn filter_platforms<'a>(selection: &str, platforms: &'a [Platform]) -> Vec<&'a Platform> {
    if selection == ALL_PLATFORMS {
        return platforms.iter().collect();
    }
    platforms
        .iter()
        .filter(|p| p.name.eq_ignore_ascii_case(selection))
        .collect()
}

/// Where the directory document comes from; one fetch per view session.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn fetch(&self) -> Result<Directory>;
}

/// Fetches the directory from a well-known URL over HTTP.
pub struct HttpDirectorySource {
    client: reqwest::Client,
    url: Url,
}

impl HttpDirectorySource {
    pub fn new(url: Url, timeout_ms: Option<u64>) -> Result<Self> {
        let timeout = Duration::from_millis(timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS));
        let client = reqwest::Client::builder()
            .user_agent("pathways/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self { client, url })
    }

    /// Build the source from a site base URL, joining the well-known path.
    pub fn from_base(base: &str, timeout_ms: Option<u64>) -> Result<Self> {
        let base = Url::parse(base).with_context(|| format!("invalid directory base URL: {base}"))?;
        let url = base
            .join(DIRECTORY_PATH)
            .with_context(|| format!("joining {DIRECTORY_PATH} onto {base}"))?;
        Self::new(url, timeout_ms)
    }
}

#[async_trait]
impl DirectorySource for HttpDirectorySource {
    async fn fetch(&self) -> Result<Directory> {
        tracing::debug!(url = %self.url, "fetching community directory");
        let resp = self.client.get(self.url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("directory request failed with status {}", resp.status()));
        }
        let directory = resp.json::<Directory>().await.context("decoding directory document")?;
        Ok(directory)
    }
}

/// Reads the directory from a local JSON file (CLI default and tests).
pub struct FileDirectorySource {
    path: PathBuf,
}

impl FileDirectorySource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl DirectorySource for FileDirectorySource {
    async fn fetch(&self) -> Result<Directory> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading directory document: {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing directory document: {}", self.path.display()))
    }
}
