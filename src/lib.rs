pub mod catalog;
pub mod config;
pub mod directory;
pub mod navigation;
pub mod routes;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::catalog::{Catalog, CatalogStats, Category, Content, Resource, Section, Topic, Video};
    pub use crate::config::BrowserConfig;
    pub use crate::directory::{
        filter_platforms, Community, Directory, DirectorySource, DirectoryState, Platform,
        ALL_PLATFORMS,
    };
    pub use crate::navigation::NavigationState;
    pub use crate::routes::Route;
    pub use crate::{Pathways, TopicSummary};
}

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogStats, Topic};
use crate::config::BrowserConfig;
use crate::directory::{
    filter_platforms, Directory, DirectorySource, DirectoryState, FileDirectorySource,
    HttpDirectorySource,
};
use crate::navigation::NavigationState;

// --- Data structures for UI API ---

/// Card-level view of a topic for listing and sidebar navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummary {
    pub id: String,
    pub title: String,
    pub short_description: String,
}

/// Library entry point. Owns the loaded catalog and the directory source;
/// the directory itself is fetched once on first use and cached.
pub struct Pathways {
    catalog: Catalog,
    source: Arc<dyn DirectorySource>,
    // Held across the fetch so a first load issues exactly one request.
    directory: tokio::sync::Mutex<Option<DirectoryState>>,
}

impl Pathways {
    /// Load the catalog (configured path or bundled document) and wire up the
    /// directory source (configured URL, else the local sample document).
    pub fn open(config: &BrowserConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::bundled()?,
        };
        let source: Arc<dyn DirectorySource> = match &config.directory_url {
            Some(base) => Arc::new(HttpDirectorySource::from_base(base, config.request_timeout_ms)?),
            None => Arc::new(FileDirectorySource::new(PathBuf::from("data/communities.json"))),
        };
        tracing::info!(topics = catalog.stats().total_topics, "catalog loaded");
        Ok(Self::with_source(catalog, source))
    }

    /// Assemble from parts; used by embedders and tests that supply their own source.
    pub fn with_source(catalog: Catalog, source: Arc<dyn DirectorySource>) -> Self {
        Self {
            catalog,
            source,
            directory: tokio::sync::Mutex::new(None),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn resolve_topic(&self, topic_id: &str) -> Option<&Topic> {
        self.catalog.resolve_topic(topic_id)
    }

    /// Resolve a topic and start a fresh per-view navigation state for it.
    pub fn begin_topic(&self, topic_id: &str) -> Option<(&Topic, NavigationState)> {
        let topic = self.catalog.resolve_topic(topic_id)?;
        Some((topic, NavigationState::for_topic(topic)))
    }

    pub fn topic_summaries(&self) -> Vec<TopicSummary> {
        self.catalog
            .all_topics()
            .map(|t| TopicSummary {
                id: t.id.clone(),
                title: t.title.clone(),
                short_description: t.short_description.clone(),
            })
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        self.catalog.stats()
    }

    /// The community directory. Fetched once and cached, including the
    /// unavailable outcome; `refresh` forces a new request (reload semantics).
    pub async fn directory(&self, refresh: bool) -> DirectoryState {
        let mut cached = self.directory.lock().await;
        if !refresh {
            if let Some(state) = cached.as_ref() {
                return state.clone();
            }
        }
        let state = match self.source.fetch().await {
            Ok(directory) => DirectoryState::Ready(directory),
            Err(e) => {
                tracing::warn!(error = %e, "community directory unavailable");
                DirectoryState::Unavailable(e.to_string())
            }
        };
        *cached = Some(state.clone());
        state
    }

    /// Directory load plus platform filtering for the community view.
    pub async fn platforms(&self, selection: &str, refresh: bool) -> DirectoryState {
        match self.directory(refresh).await {
            DirectoryState::Ready(directory) => {
                let visible = filter_platforms(selection, &directory.platforms)
                    .into_iter()
                    .cloned()
                    .collect();
                DirectoryState::Ready(Directory { platforms: visible })
            }
            unavailable => unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        fetches: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl DirectorySource for CountingSource {
        async fn fetch(&self) -> Result<Directory> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            Ok(serde_json::from_str(
                r#"{"platforms": [
                    {"name": "GitHub", "description": "code", "communities": []},
                    {"name": "Reddit", "description": "threads", "communities": []}
                ]}"#,
            )?)
        }
    }

    fn browser(fail: bool) -> (Pathways, Arc<CountingSource>) {
        let source = Arc::new(CountingSource {
            fetches: AtomicUsize::new(0),
            fail,
        });
        let catalog = Catalog::bundled().unwrap();
        (Pathways::with_source(catalog, source.clone()), source)
    }

    #[test]
    fn open_loads_the_bundled_catalog() {
        let browser = Pathways::open(&BrowserConfig::default()).unwrap();
        assert!(browser.resolve_topic("html").is_some());
        assert!(browser.resolve_topic("fortran").is_none());
    }

    #[test]
    fn begin_topic_seeds_navigation_state() {
        let (browser, _) = browser(false);
        let (topic, state) = browser.begin_topic("html").unwrap();
        assert_eq!(topic.id, "html");
        let first = topic.content.sections.first().unwrap().anchor();
        assert_eq!(state.active_section(), Some(first.as_str()));
    }

    #[tokio::test]
    async fn directory_is_fetched_exactly_once() {
        let (browser, source) = browser(false);
        assert!(browser.directory(false).await.is_ready());
        assert!(browser.directory(false).await.is_ready());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_forces_a_new_fetch() {
        let (browser, source) = browser(false);
        browser.directory(false).await;
        browser.directory(true).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_fetch_resolves_to_unavailable() {
        let (browser, source) = browser(true);
        let state = browser.directory(false).await;
        assert!(matches!(state, DirectoryState::Unavailable(_)));
        // The outcome is cached; retry is an explicit refresh.
        browser.directory(false).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn platforms_filters_the_loaded_directory() {
        let (browser, _) = browser(false);
        match browser.platforms("reddit", false).await {
            DirectoryState::Ready(directory) => {
                assert_eq!(directory.platforms.len(), 1);
                assert_eq!(directory.platforms[0].name, "Reddit");
            }
            DirectoryState::Unavailable(reason) => panic!("unexpected: {reason}"),
        }
    }

    #[test]
    fn summaries_preserve_catalog_order() {
        let (browser, _) = browser(false);
        let summaries = browser.topic_summaries();
        let from_catalog: Vec<&str> = browser.catalog().all_topics().map(|t| t.id.as_str()).collect();
        let from_summaries: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(from_catalog, from_summaries);
    }
}
