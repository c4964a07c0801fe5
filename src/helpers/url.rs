//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/about/") // -> "/folio/about/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/folio/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Site-relative path of a project detail page, without the root
pub fn project_path(config: &SiteConfig, slug: &str) -> String {
    format!("{}/{}/", config.project_dir.trim_matches('/'), slug)
}

/// Site-relative path of a tag page, without the root
pub fn tag_path(config: &SiteConfig, tag: &str) -> String {
    format!("{}/{}/", config.tag_dir.trim_matches('/'), slug::slugify(tag))
}

/// Absolute URLs and protocol-relative URLs are left untouched
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("//")
        || path.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/folio/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/placeholder.svg"), "/folio/placeholder.svg");
        assert_eq!(url_for(&config, "about/"), "/folio/about/");
        assert_eq!(url_for(&config, ""), "/folio/");
        assert_eq!(
            url_for(&config, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_url_for_default_root() {
        let config = SiteConfig::default();
        assert_eq!(url_for(&config, "/about/"), "/about/");
        assert_eq!(url_for(&config, "/"), "/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/about/"),
            "https://example.com/folio/about/"
        );
    }

    #[test]
    fn test_project_and_tag_paths() {
        let config = test_config();
        assert_eq!(
            project_path(&config, "injury-prevention"),
            "projects/injury-prevention/"
        );
        assert_eq!(tag_path(&config, "Sports Medicine"), "tags/sports-medicine/");
    }
}
