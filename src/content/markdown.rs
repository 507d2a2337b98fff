//! Markdown rendering with syntax highlighting

use anyhow::{anyhow, Result};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Size hints for images lifted out of post paragraphs
const IMAGE_WIDTH: u32 = 600;
const IMAGE_HEIGHT: u32 = 300;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        self.render_events(markdown, None)
    }

    /// Render a post body
    ///
    /// A paragraph that opens with an image becomes a standalone image block
    /// whose `src` is resolved against `image_base`.
    pub fn render_with_images(&self, markdown: &str, image_base: &str) -> Result<String> {
        self.render_events(markdown, Some(image_base))
    }

    fn render_events(&self, markdown: &str, image_base: Option<&str>) -> Result<String> {
        // Front-matter is split off before we get here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let mut parser = Parser::new_ext(markdown, options).peekable();

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        while let Some(event) = parser.next() {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Info strings may carry extra words ("rust ignore")
                            let lang = lang.split_whitespace().next().unwrap_or("");
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang.to_string())
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref())?;
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                Event::Start(Tag::Paragraph) if image_base.is_some() => {
                    let dest_url = match parser.peek() {
                        Some(Event::Start(Tag::Image { dest_url, .. })) => dest_url.clone(),
                        _ => {
                            events.push(Event::Start(Tag::Paragraph));
                            continue;
                        }
                    };
                    parser.next();

                    // Alt text is every text event inside the image
                    let mut alt = String::new();
                    for inner in parser.by_ref() {
                        match inner {
                            Event::End(TagEnd::Image) => break,
                            Event::Text(t) | Event::Code(t) => alt.push_str(&t),
                            _ => {}
                        }
                    }
                    // The image replaces the whole paragraph
                    for rest in parser.by_ref() {
                        if let Event::End(TagEnd::Paragraph) = rest {
                            break;
                        }
                    }

                    let src = resolve_image_src(image_base.unwrap_or_default(), &dest_url);
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<div class="image"><img src="{}" alt="{}" width="{}" height="{}" loading="lazy"></div>"#,
                        html_escape(&src),
                        html_escape(&alt),
                        IMAGE_WIDTH,
                        IMAGE_HEIGHT
                    ))));
                }
                other => {
                    if !in_code_block {
                        events.push(other);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String> {
        let lang = lang.unwrap_or("text");

        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
            .ok_or_else(|| anyhow!("No highlighting themes available"))?;

        let html = match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                if self.line_numbers {
                    self.add_line_numbers(&highlighted, lang)
                } else {
                    format!(r#"<div class="code language-{}">{}</div>"#, lang, highlighted)
                }
            }
            Err(e) => {
                tracing::debug!("Highlighting {} failed, emitting plain code: {}", lang, e);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang,
                    html_escape(code)
                )
            }
        };

        Ok(html)
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
            lang,
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

/// Absolute and root-relative sources are left alone
fn resolve_image_src(base: &str, src: &str) -> String {
    if src.starts_with('/') || src.contains("://") {
        src.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), src)
    }
}

/// Simple HTML escaping
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```js\nconst answer = 42;\n```")
            .unwrap();
        assert!(html.contains("language-js"));
        assert!(html.contains("answer"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_render_code_block_with_line_numbers() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", true);
        let html = renderer.render("```rust\nfn a() {}\nfn b() {}\n```").unwrap();
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```nosuchlang\n<tag>\n```").unwrap();
        assert!(html.contains("&lt;tag&gt;"));
    }

    #[test]
    fn test_leading_image_becomes_image_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render_with_images(
                "Intro\n\n![Create routes via your file + folder structure](nextjs-file-based-routing.png)\n",
                "/images/posts/getting-started",
            )
            .unwrap();
        assert!(html.contains(r#"<div class="image"><img src="/images/posts/getting-started/nextjs-file-based-routing.png""#));
        assert!(html.contains(r#"alt="Create routes via your file + folder structure""#));
        assert!(html.contains("<p>Intro</p>"));
        assert!(!html.contains("<p><img"));
    }

    #[test]
    fn test_inline_image_is_left_in_paragraph() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render_with_images("Look: ![x](a.png)", "/images/posts/p")
            .unwrap();
        assert!(html.contains("<p>Look: <img"));
        assert!(html.contains(r#"src="a.png""#));
    }

    #[test]
    fn test_absolute_image_source_is_kept() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render_with_images("![logo](https://example.com/logo.png)", "/images/posts/p")
            .unwrap();
        assert!(html.contains(r#"src="https://example.com/logo.png""#));
    }
}
