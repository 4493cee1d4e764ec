use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// Catalog document compiled into the binary; edits to data/topics.json ship with the build.
static BUNDLED_CATALOG: &str = include_str!("../data/topics.json");

/// The static tree of categories, topics and their content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(rename = "shortDescription", default)]
    pub short_description: String,
    #[serde(default)]
    pub content: Content,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
    #[serde(rename = "codeExample", default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub description: String,
    #[serde(rename = "embedId")]
    pub embed_id: String,
}

/// Aggregate counts over a loaded catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_categories: usize,
    pub total_topics: usize,
    pub total_sections: usize,
    pub total_resources: usize,
    pub total_videos: usize,
    pub code_examples: usize,
}

impl Section {
    /// Stable anchor slug derived from the title: lowercase, whitespace runs become '-'.
    pub fn anchor(&self) -> String {
        section_anchor(&self.title)
    }
}

impl Catalog {
    /// Parse and validate the compiled-in catalog document.
    pub fn bundled() -> Result<Self> {
        Self::from_str(BUNDLED_CATALOG).context("parsing bundled catalog document")
    }

    /// Parse and validate a catalog document from disk (synchronous; startup only).
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog document: {}", path.display()))?;
        Self::from_str(&raw).with_context(|| format!("parsing catalog document: {}", path.display()))
    }

    fn from_str(raw: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject duplicate category ids and duplicate topic ids. Topic ids must be
    /// unique across the whole catalog because routing addresses topics by id alone.
    pub fn validate(&self) -> Result<()> {
        let mut category_ids = HashSet::new();
        let mut topic_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                bail!("duplicate category id in catalog: {}", category.id);
            }
            for topic in &category.topics {
                if !topic_ids.insert(topic.id.as_str()) {
                    bail!("duplicate topic id in catalog: {}", topic.id);
                }
            }
        }
        Ok(())
    }

    /// Locate a topic by its routing id. Linear scan over the flattened topic
    /// list in display order; `None` is the not-found state the view must render.
    pub fn resolve_topic(&self, topic_id: &str) -> Option<&Topic> {
        self.all_topics().find(|t| t.id == topic_id)
    }

    /// All topics across categories in display order (sidebar navigation list).
    pub fn all_topics(&self) -> impl Iterator<Item = &Topic> {
        self.categories.iter().flat_map(|c| c.topics.iter())
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            total_categories: self.categories.len(),
            total_topics: 0,
            total_sections: 0,
            total_resources: 0,
            total_videos: 0,
            code_examples: 0,
        };
        for topic in self.all_topics() {
            stats.total_topics += 1;
            stats.total_sections += topic.content.sections.len();
            stats.total_resources += topic.content.resources.len();
            stats.total_videos += topic.content.videos.len();
            stats.code_examples += topic
                .content
                .sections
                .iter()
                .filter(|s| s.code_example.is_some())
                .count();
        }
        stats
    }
}

/// Lowercase the title and collapse each whitespace run into a single '-',
/// matching the anchors the rendered document uses for section links.
pub fn section_anchor(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}
