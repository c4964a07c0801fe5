//! Project and About page models

use serde::{Deserialize, Serialize};

/// One portfolio case study
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    /// Unique, URL-safe lookup key
    pub slug: String,

    /// Display name
    pub title: String,

    pub summary: String,
    pub problem: String,
    pub solution: String,

    /// Hero image, normalized at load time
    pub image: Option<Image>,

    /// Category labels in authored order, without duplicates
    pub tags: Vec<String>,

    /// Feature cards in display order
    pub features: Vec<Feature>,

    /// Repository and contact buttons
    pub links: ExternalLinks,

    /// YouTube video identifier for the demo section
    pub video_id: Option<String>,

    /// Raw markdown body rendered below the features
    pub content: Option<String>,
}

impl ProjectRecord {
    /// Create a record with only the required fields set
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            summary: String::new(),
            problem: String::new(),
            solution: String::new(),
            image: None,
            tags: Vec::new(),
            features: Vec::new(),
            links: ExternalLinks::default(),
            video_id: None,
            content: None,
        }
    }

    /// Page description: the summary, or the title when there is none
    pub fn description(&self) -> &str {
        if self.summary.trim().is_empty() {
            &self.title
        } else {
            &self.summary
        }
    }

    /// Whether the project carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A normalized image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub path: String,
    pub alt: String,
}

/// Image as authored: a bare path or a `{src, alt}` mapping
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImageSource {
    PlainPath(String),
    Structured {
        #[serde(alias = "path")]
        src: String,
        #[serde(default)]
        alt: Option<String>,
    },
}

impl ImageSource {
    /// Resolve into a single shape, using `fallback_alt` when no alt text is given
    pub fn normalize(self, fallback_alt: &str) -> Option<Image> {
        let (path, alt) = match self {
            ImageSource::PlainPath(path) => (path, None),
            ImageSource::Structured { src, alt } => (src, alt),
        };

        let path = path.trim().to_string();
        if path.is_empty() {
            return None;
        }

        let alt = alt
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| fallback_alt.to_string());

        Some(Image { path, alt })
    }
}

/// A feature card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Optional outbound links for a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalLinks {
    #[serde(alias = "github")]
    pub repository: Option<String>,
    pub contact: Option<String>,
}

impl ExternalLinks {
    /// Whether any button should be rendered
    pub fn is_empty(&self) -> bool {
        self.repository.is_none() && self.contact.is_none()
    }
}

/// The About page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutPage {
    pub title: String,
    /// Raw markdown body
    pub content: Option<String>,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self {
            title: "About".to_string(),
            content: None,
        }
    }
}
