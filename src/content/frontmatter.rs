//! Front-matter parsing for project and page files

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::path::Path;

use super::project::{AboutPage, ExternalLinks, Feature, ImageSource, ProjectRecord};
use crate::error::{ContentError, Result};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a project file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub image: Option<ImageSource>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub features: Vec<Feature>,
    pub links: ExternalLinks,
    #[serde(alias = "youtube_id")]
    pub video_id: Option<String>,
}

/// Front-matter of the About page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageFrontMatter {
    pub title: Option<String>,
}

/// Split a document into its YAML block and the remaining body.
///
/// The block must open with a line that is exactly `---` and close with
/// another such line. Returns `None` otherwise, so a leading horizontal
/// rule stays part of the body.
fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}');
    let (first, rest) = content.split_once('\n')?;
    if first.trim_end() != "---" {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }
    None
}

/// Parse front-matter of type `T` from a document.
///
/// A document without a closed front-matter block yields `T::default()` and
/// the whole text as body. YAML errors inside a closed block are reported.
pub fn parse<'a, T>(content: &'a str, path: &Path) -> Result<(T, &'a str)>
where
    T: DeserializeOwned + Default,
{
    let Some((yaml, body)) = split(content) else {
        return Ok((T::default(), content));
    };

    if yaml.trim().is_empty() {
        return Ok((T::default(), body));
    }

    let fm = serde_yaml::from_str::<T>(yaml)
        .map_err(|e| ContentError::frontmatter(path, e.to_string()))?;
    Ok((fm, body))
}

impl FrontMatter {
    /// Build a record from this front-matter and the document body.
    ///
    /// `fallback_slug` is used when the front-matter has no `slug`.
    pub fn into_record(self, fallback_slug: &str, body: &str) -> ProjectRecord {
        let title = self.title.unwrap_or_default().trim().to_string();
        let slug = self
            .slug
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| fallback_slug.to_string());

        let image = self.image.and_then(|img| img.normalize(&title));

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            let tag = tag.trim().to_string();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let mut record = ProjectRecord::new(slug, title);
        record.summary = self.summary.unwrap_or_default();
        record.problem = self.problem.unwrap_or_default();
        record.solution = self.solution.unwrap_or_default();
        record.image = image;
        record.tags = tags;
        record.features = self.features;
        record.links = ExternalLinks {
            repository: non_blank(self.links.repository),
            contact: non_blank(self.links.contact),
        };
        record.video_id = non_blank(self.video_id);
        record.content = non_blank(Some(body.to_string()));
        record
    }
}

impl PageFrontMatter {
    /// Build the About page from this front-matter and the document body
    pub fn into_about(self, body: &str) -> AboutPage {
        let defaults = AboutPage::default();
        AboutPage {
            title: non_blank(self.title).unwrap_or(defaults.title),
            content: non_blank(Some(body.to_string())),
        }
    }
}

/// Parse a project document
pub fn parse_project(content: &str, path: &Path, fallback_slug: &str) -> Result<ProjectRecord> {
    let (fm, body) = parse::<FrontMatter>(content, path)?;
    Ok(fm.into_record(fallback_slug, body))
}

/// Parse the About page document
pub fn parse_about(content: &str, path: &Path) -> Result<AboutPage> {
    let (fm, body) = parse::<PageFrontMatter>(content, path)?;
    Ok(fm.into_about(body))
}

/// Trim a value, dropping it when nothing is left
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
