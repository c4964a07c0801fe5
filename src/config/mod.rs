//! Configuration module

mod site;
mod social;

pub use site::HighlightConfig;
pub use site::MarkdownConfig;
pub use site::SiteConfig;
pub use social::{SocialEntry, SocialLinks};
