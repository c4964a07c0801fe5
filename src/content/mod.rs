//! Content module - project records, markdown rendering and the content store

mod frontmatter;
pub mod loader;
mod markdown;
mod project;
mod store;

pub use frontmatter::{parse_about, parse_project, FrontMatter, PageFrontMatter};
pub use markdown::MarkdownRenderer;
pub use project::{AboutPage, ExternalLinks, Feature, Image, ImageSource, ProjectRecord};
pub use store::{sample_about, ContentStore};

pub(crate) use store::{SAMPLE_ABOUT, SAMPLE_PROJECTS};
