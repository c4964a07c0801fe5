//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::SiteConfig;
use crate::helpers::html_escape;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
    sanitize: bool,
    smart_punctuation: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "base16-ocean.dark".to_string(),
            highlight: true,
            line_numbers: false,
            sanitize: true,
            smart_punctuation: true,
        }
    }

    /// Create from the site's highlight and markdown settings
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            theme_name: config.highlight.theme.clone(),
            highlight: config.highlight.enable,
            line_numbers: config.highlight.line_number,
            sanitize: config.markdown.sanitize,
            smart_punctuation: config.markdown.smart_punctuation,
            ..Self::new()
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        if self.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Info strings may carry attributes after the language
                            let lang = lang.split_whitespace().next().unwrap_or("").to_string();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang)
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let block = self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(block)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                Event::Html(raw) | Event::InlineHtml(raw) if self.sanitize => {
                    events.push(Event::Text(raw));
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Render an optional section body.
    ///
    /// Absent, empty or whitespace-only input yields `None` so that callers
    /// skip the section instead of emitting an empty wrapper.
    pub fn render_section(&self, markdown: Option<&str>) -> Result<Option<String>> {
        match markdown {
            Some(text) if !text.trim().is_empty() => {
                let html = self.render(text)?;
                if html.trim().is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(html))
                }
            }
            _ => Ok(None),
        }
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang_name = lang.unwrap_or("text");
        let escaped = || {
            format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang_name),
                html_escape(code)
            )
        };

        if !self.highlight || lang.is_none() {
            return escaped();
        }

        let Some(theme) = self.theme() else {
            tracing::warn!("No highlight themes available, emitting plain code");
            return escaped();
        };

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang_name)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                if self.line_numbers {
                    self.add_line_numbers(&highlighted, lang_name)
                } else {
                    format!(
                        r#"<figure class="highlight {}">{}</figure>"#,
                        html_escape(lang_name),
                        highlighted
                    )
                }
            }
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang_name, e);
                escaped()
            }
        }
    }

    /// Configured theme, or any bundled theme when the name is unknown
    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            html_escape(lang),
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Title\n\nBody text").unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Body text</p>"));
    }

    #[test]
    fn test_render_lists_and_emphasis() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("### Phase 1\n\n- *Reduce* swelling\n- Restore **range**")
            .unwrap();
        assert!(html.contains("<h3>Phase 1</h3>"));
        assert!(html.contains("<ul>"));
        assert!(html.contains("<em>Reduce</em>"));
        assert!(html.contains("<strong>range</strong>"));
    }

    #[test]
    fn test_render_section_skips_empty() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.render_section(None).unwrap(), None);
        assert_eq!(renderer.render_section(Some("")).unwrap(), None);
        assert_eq!(renderer.render_section(Some(" \n\t")).unwrap(), None);
        assert!(renderer.render_section(Some("text")).unwrap().is_some());
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unlabelled_code_block_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\n<b>bold</b>\n```").unwrap();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("<script>alert(1)</script>\n\nHello <span>inline</span>")
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<span>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_raw_html_passes_when_not_sanitizing() {
        let mut config = SiteConfig::default();
        config.markdown.sanitize = false;
        let renderer = MarkdownRenderer::from_config(&config);
        let html = renderer.render("Hello <span>inline</span>").unwrap();
        assert!(html.contains("<span>inline</span>"));
    }
}
