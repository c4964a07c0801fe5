//! Outbound social profile links

use serde::Serialize;

/// Default destinations used when an environment variable is unset
const DEFAULT_GITHUB: &str = "https://github.com";
const DEFAULT_LINKEDIN: &str = "https://www.linkedin.com";
const DEFAULT_YOUTUBE: &str = "https://www.youtube.com";
const DEFAULT_TWITTER: &str = "https://x.com";
const DEFAULT_INSTAGRAM: &str = "https://www.instagram.com";

/// Social profile links shown in the footer and on the About page.
///
/// | Env Var                | Default                     |
/// |------------------------|-----------------------------|
/// | `SOCIAL_GITHUB_URL`    | `https://github.com`        |
/// | `SOCIAL_LINKEDIN_URL`  | `https://www.linkedin.com`  |
/// | `SOCIAL_YOUTUBE_URL`   | `https://www.youtube.com`   |
/// | `SOCIAL_TWITTER_URL`   | `https://x.com`             |
/// | `SOCIAL_INSTAGRAM_URL` | `https://www.instagram.com` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub youtube: String,
    pub twitter: String,
    pub instagram: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            github: DEFAULT_GITHUB.to_string(),
            linkedin: DEFAULT_LINKEDIN.to_string(),
            youtube: DEFAULT_YOUTUBE.to_string(),
            twitter: DEFAULT_TWITTER.to_string(),
            instagram: DEFAULT_INSTAGRAM.to_string(),
        }
    }
}

impl SocialLinks {
    /// Read links through a lookup function, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            env_value(&lookup, key).unwrap_or_else(|| default.to_string())
        };

        Self {
            github: get("SOCIAL_GITHUB_URL", DEFAULT_GITHUB),
            linkedin: get("SOCIAL_LINKEDIN_URL", DEFAULT_LINKEDIN),
            youtube: get("SOCIAL_YOUTUBE_URL", DEFAULT_YOUTUBE),
            twitter: get("SOCIAL_TWITTER_URL", DEFAULT_TWITTER),
            instagram: get("SOCIAL_INSTAGRAM_URL", DEFAULT_INSTAGRAM),
        }
    }

    /// Links in footer display order as (label, url) pairs
    pub fn entries(&self) -> Vec<SocialEntry> {
        vec![
            SocialEntry::new("twitter", "X (formerly Twitter)", &self.twitter),
            SocialEntry::new("github", "GitHub", &self.github),
            SocialEntry::new("linkedin", "LinkedIn", &self.linkedin),
            SocialEntry::new("youtube", "YouTube", &self.youtube),
            SocialEntry::new("instagram", "Instagram", &self.instagram),
        ]
    }
}

/// One rendered footer link
#[derive(Debug, Clone, Serialize)]
pub struct SocialEntry {
    pub key: String,
    pub label: String,
    pub url: String,
}

impl SocialEntry {
    fn new(key: &str, label: &str, url: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Look up a variable, treating blank values as unset
pub(crate) fn env_value<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let links = SocialLinks::from_lookup(lookup_from(&[]));
        assert_eq!(links, SocialLinks::default());
        assert_eq!(links.github, "https://github.com");
    }

    #[test]
    fn test_env_values_override() {
        let links = SocialLinks::from_lookup(lookup_from(&[
            ("SOCIAL_GITHUB_URL", "https://github.com/jortiz"),
            ("SOCIAL_INSTAGRAM_URL", " https://instagram.com/jortiz "),
        ]));
        assert_eq!(links.github, "https://github.com/jortiz");
        assert_eq!(links.instagram, "https://instagram.com/jortiz");
        assert_eq!(links.linkedin, "https://www.linkedin.com");
    }

    #[test]
    fn test_blank_value_falls_back() {
        let links = SocialLinks::from_lookup(lookup_from(&[("SOCIAL_YOUTUBE_URL", "")]));
        assert_eq!(links.youtube, "https://www.youtube.com");
    }

    #[test]
    fn test_entries_order() {
        let keys: Vec<String> = SocialLinks::default()
            .entries()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, ["twitter", "github", "linkedin", "youtube", "instagram"]);
    }
}
