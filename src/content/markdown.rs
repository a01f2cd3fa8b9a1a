//! Markdown rendering with heading anchors and syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::frontmatter::FrontMatter;
use super::source::RawDocument;
use crate::config::HighlightConfig;
use crate::error::Result;
use crate::helpers::html_escape;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_]+").unwrap();
}

/// Short language tags and their canonical names
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("sh", "bash"),
    ("shell", "bash"),
    ("yml", "yaml"),
    ("md", "markdown"),
    ("py", "python"),
    ("rs", "rust"),
    ("rb", "ruby"),
    ("kt", "kotlin"),
    ("cs", "csharp"),
];

const COPY_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><rect x="9" y="9" width="13" height="13" rx="2" ry="2"></rect><path d="M5 15H4a2 2 0 0 1-2-2V4a2 2 0 0 1 2-2h9a2 2 0 0 1 2 2v1"></path></svg>"#;

/// A document split into rendered HTML and its raw front-matter
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub html: String,
    pub front_matter: FrontMatter,
}

/// Markdown renderer with syntax highlighting.
///
/// Built once from a [`HighlightConfig`] and shared by reference; rendering
/// never mutates it.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    highlight: HighlightConfig,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(highlight: HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            highlight,
        }
    }

    /// Split front-matter from the body and render the body
    pub fn parse(&self, doc: &RawDocument) -> Result<ParsedDocument> {
        let (front_matter, body) = FrontMatter::parse(&doc.id, &doc.text)?;
        Ok(ParsedDocument {
            html: self.render(body),
            front_matter,
        })
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut heading: Option<(u8, Option<String>, Vec<Event>)> = None;

        for event in parser {
            if code_block.is_some() {
                match event {
                    Event::Text(text) => {
                        if let Some((_, code)) = code_block.as_mut() {
                            code.push_str(&text);
                        }
                    }
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some((lang, code)) = code_block.take() {
                            let block = self.render_code_block(&code, lang.as_deref());
                            events.push(Event::Html(CowStr::from(block)));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .filter(|l| !l.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Heading { level, id, .. }) => {
                    heading = Some((level as u8, id.map(|id| id.to_string()), Vec::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, id, inner)) = heading.take() {
                        events.push(Event::Html(CowStr::from(render_heading(level, id, inner))));
                    }
                }
                Event::SoftBreak => push_event(&mut events, &mut heading, Event::HardBreak),
                other => push_event(&mut events, &mut heading, other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        html_output
    }

    /// Render a fenced or indented code block with its label and copy button
    fn render_code_block(&self, code: &str, lang: Option<&str>) -> String {
        let label = lang.map(resolve_language).unwrap_or_else(|| "text".to_string());
        let highlighted = self.highlight_code(code, lang, &label);

        let copy_button = if self.highlight.copy_button {
            format!(
                r#"<button class="code-block-copy" onclick="copyCode(this)" title="Copy code">{}</button>"#,
                COPY_ICON
            )
        } else {
            String::new()
        };

        format!(
            r#"<div class="code-block-wrapper"><div class="code-block-header"><span class="code-block-language">{lang}</span>{copy_button}</div><pre><code class="hljs language-{lang}">{code}</code></pre></div>
"#,
            lang = html_escape(&label),
            copy_button = copy_button,
            code = highlighted
        )
    }

    /// Highlight a code block, degrading to escaped text
    fn highlight_code(&self, code: &str, raw_lang: Option<&str>, resolved: &str) -> String {
        if !self.highlight.enable {
            return html_escape(code);
        }

        let syntax = self.find_syntax(resolved, raw_lang).or_else(|| {
            if self.highlight.auto_detect {
                self.detect_syntax(code)
            } else {
                None
            }
        });

        let Some(syntax) = syntax else {
            tracing::debug!("No syntax for code block language '{}', using plain text", resolved);
            return html_escape(code);
        };

        match self.highlight_with(code, syntax) {
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::debug!("Failed to highlight code as {}: {}", syntax.name, e);
                html_escape(code)
            }
        }
    }

    fn find_syntax(&self, resolved: &str, raw_lang: Option<&str>) -> Option<&SyntaxReference> {
        std::iter::once(resolved)
            .chain(raw_lang)
            .filter(|lang| *lang != "text")
            .find_map(|lang| {
                self.syntax_set
                    .find_syntax_by_token(lang)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            })
    }

    /// Guess a syntax from a shebang or modeline on the first line
    fn detect_syntax(&self, code: &str) -> Option<&SyntaxReference> {
        let first_line = code.lines().next()?;
        self.syntax_set.find_syntax_by_first_line(first_line)
    }

    fn highlight_with(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> std::result::Result<String, syntect::Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a code block tag through the alias table
pub fn resolve_language(lang: &str) -> String {
    let lower = lang.to_lowercase();
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, name)| name.to_string())
        .unwrap_or(lower)
}

/// Derive a heading id: lowercase, runs of non-word characters become `-`
pub fn heading_id(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), "-").into_owned()
}

fn push_event<'a>(
    events: &mut Vec<Event<'a>>,
    heading: &mut Option<(u8, Option<String>, Vec<Event<'a>>)>,
    event: Event<'a>,
) {
    match heading.as_mut() {
        Some((_, _, inner)) => inner.push(event),
        None => events.push(event),
    }
}

fn render_heading(level: u8, explicit_id: Option<String>, inner: Vec<Event>) -> String {
    let text: String = inner
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) | Event::Code(t) => Some(&**t),
            _ => None,
        })
        .collect();
    let id = explicit_id.unwrap_or_else(|| heading_id(&text));
    let id = html_escape(&id);

    let mut content = String::new();
    html::push_html(&mut content, inner.into_iter());

    format!(
        "<h{level} id=\"{id}\"><a href=\"#{id}\" class=\"anchor-link\" aria-hidden=\"true\">#</a>{content}</h{level}>\n",
        level = level,
        id = id,
        content = content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Para one\nsame paragraph\n\n**bold** ~~gone~~");
        assert!(html.contains("<p>Para one<br />\nsame paragraph</p>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_heading_anchor() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Hello, World & `Rust`!");
        assert!(html.contains(r#"<h2 id="hello-world-rust-">"#));
        assert!(html.contains(r##"<a href="#hello-world-rust-" class="anchor-link" aria-hidden="true">#</a>"##));
        assert!(html.contains("<code>Rust</code>"));
        assert!(html.trim_end().ends_with("</h2>"));
    }

    #[test]
    fn test_explicit_heading_id() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Setup {#install}");
        assert!(html.contains(r#"<h1 id="install">"#));
    }

    #[test]
    fn test_heading_id() {
        assert_eq!(heading_id("Getting Started"), "getting-started");
        assert_eq!(heading_id("What's   new?"), "what-s-new-");
        assert_eq!(heading_id("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_resolve_language() {
        assert_eq!(resolve_language("js"), "javascript");
        assert_eq!(resolve_language("TS"), "typescript");
        assert_eq!(resolve_language("shell"), "bash");
        assert_eq!(resolve_language("cs"), "csharp");
        assert_eq!(resolve_language("go"), "go");
    }

    #[test]
    fn test_js_block_highlighted_as_javascript() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```js\nconst answer = 42;\n```");
        assert!(html.contains(r#"<span class="code-block-language">javascript</span>"#));
        assert!(html.contains(r#"<code class="hljs language-javascript">"#));
        assert!(html.contains("<span class=\"source js\">"));
        assert!(html.contains("code-block-copy"));
    }

    #[test]
    fn test_unknown_language_degrades() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```madeup-lang\nif a < b && c > d {}\n```");
        assert!(html.contains("language-madeup-lang"));
        assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d {}"));
    }

    #[test]
    fn test_auto_detect_from_shebang() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```madeup-lang\n#!/usr/bin/env python\nprint('hi')\n```");
        assert!(html.contains("<span class=\"source python\">"));
    }

    #[test]
    fn test_untagged_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\n<b>raw</b>\n```");
        assert!(html.contains(r#"<span class="code-block-language">text</span>"#));
        assert!(html.contains("raw"));
        assert!(!html.contains("<b>raw</b>"));
    }

    #[test]
    fn test_highlight_disabled() {
        let renderer = MarkdownRenderer::with_options(HighlightConfig {
            enable: false,
            auto_detect: false,
            copy_button: false,
        });
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<code class="hljs language-rust">fn main() {}"#));
        assert!(!html.contains("code-block-copy"));
    }

    #[test]
    fn test_parse_document() {
        let renderer = MarkdownRenderer::new();
        let doc = RawDocument::new("posts/hello.md", "---\ntitle: Hello\n---\n# Hi\n");
        let parsed = renderer.parse(&doc).unwrap();
        assert!(parsed.html.contains(r#"<h1 id="hi">"#));
        assert_eq!(parsed.front_matter.len(), 1);
    }

    #[test]
    fn test_table_rendering() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
