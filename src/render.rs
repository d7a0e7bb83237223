use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag};
use std::fmt;
use tracing::debug;

/// A rendering capability that can be enabled on the [`Renderer`].
///
/// Plugins are fixed at construction and apply uniformly to every
/// subsequent render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plugin {
    /// Add an `id` attribute to every heading, derived from its text.
    Anchor,
    /// Tag code elements with the `hljs` class for client-side highlighting.
    SyntaxHighlight,
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anchor => write!(f, "anchor"),
            Self::SyntaxHighlight => write!(f, "syntax-highlight"),
        }
    }
}

/// Converts Markdown text into indentation-based Pug markup.
///
/// Wraps the `pulldown-cmark` engine; block structure becomes nested Pug
/// tags, inline markup becomes Pug tag interpolation (`#[strong …]`).
#[derive(Debug, Clone)]
pub struct Renderer {
    anchor: bool,
    syntax_highlight: bool,
}

impl Renderer {
    /// Creates a renderer with the given plugins enabled.
    #[must_use]
    pub fn new(plugins: &[Plugin]) -> Self {
        let renderer = Self {
            anchor: plugins.contains(&Plugin::Anchor),
            syntax_highlight: plugins.contains(&Plugin::SyntaxHighlight),
        };
        debug!(
            "Renderer configured (anchor: {}, syntax-highlight: {})",
            renderer.anchor, renderer.syntax_highlight
        );
        renderer
    }

    /// Renders Markdown text to Pug text.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let mut emitter = PugEmitter::new(self.anchor, self.syntax_highlight);
        for event in Parser::new(markdown) {
            emitter.event(event);
        }
        emitter.finish()
    }
}

/// An open block element awaiting its end event.
struct Frame {
    /// Index of the tag line in the output, patched for anchors and
    /// single-line text merging.
    line_idx: usize,
}

struct PugEmitter {
    anchor: bool,
    syntax_highlight: bool,
    lines: Vec<String>,
    indent: usize,
    inline: String,
    stack: Vec<Frame>,
    code: Option<String>,
    image: Option<ImageCtx>,
    heading_plain: Option<String>,
}

struct ImageCtx {
    url: String,
    title: String,
    alt: String,
}

impl PugEmitter {
    fn new(anchor: bool, syntax_highlight: bool) -> Self {
        Self {
            anchor,
            syntax_highlight,
            lines: Vec::new(),
            indent: 0,
            inline: String::new(),
            stack: Vec::new(),
            code: None,
            image: None,
            heading_plain: None,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if let Some(heading) = &mut self.heading_plain {
                    heading.push_str(&code);
                }
                self.inline.push_str("#[code ");
                self.inline.push_str(&escape_text(&code));
                self.inline.push(']');
            }
            Event::Html(html) => {
                // Pug passes lines starting with '<' through as literal HTML.
                if self.stack.is_empty() {
                    for line in html.lines() {
                        self.line(line);
                    }
                } else {
                    self.inline.push_str(&html);
                }
            }
            Event::SoftBreak => {
                if let Some(heading) = &mut self.heading_plain {
                    heading.push(' ');
                }
                self.inline.push('\n');
            }
            Event::HardBreak => {
                self.flush_inline();
                self.line("br");
            }
            Event::Rule => {
                self.flush_inline();
                self.line("hr");
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.start_block("p"),
            Tag::Heading(level, _, _) => {
                self.start_block(heading_tag(level));
                self.heading_plain = Some(String::new());
            }
            Tag::BlockQuote => self.start_block("blockquote"),
            Tag::CodeBlock(kind) => self.start_code_block(&kind),
            Tag::List(None) => self.start_block("ul"),
            Tag::List(Some(1)) => self.start_block("ol"),
            Tag::List(Some(start)) => {
                let tag = format!("ol(start=\"{start}\")");
                self.start_block(&tag);
            }
            Tag::Item => self.start_block("li"),
            Tag::Emphasis => self.inline.push_str("#[em "),
            Tag::Strong => self.inline.push_str("#[strong "),
            Tag::Link(_, url, title) => {
                self.inline.push_str("#[a(href=\"");
                self.inline.push_str(&escape_attr(&url));
                if !title.is_empty() {
                    self.inline.push_str("\", title=\"");
                    self.inline.push_str(&escape_attr(&title));
                }
                self.inline.push_str("\") ");
            }
            Tag::Image(_, url, title) => {
                self.image = Some(ImageCtx {
                    url: url.into_string(),
                    title: title.into_string(),
                    alt: String::new(),
                });
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph | Tag::BlockQuote | Tag::List(_) | Tag::Item => self.end_block(),
            Tag::Heading(..) => {
                if self.anchor {
                    let plain = self.heading_plain.take().unwrap_or_default();
                    let slug = slugify(&plain);
                    if !slug.is_empty() {
                        if let Some(frame) = self.stack.last() {
                            self.lines[frame.line_idx].push_str(&format!("(id=\"{slug}\")"));
                        }
                    }
                }
                self.heading_plain = None;
                self.end_block();
            }
            Tag::CodeBlock(_) => self.end_code_block(),
            Tag::Emphasis | Tag::Strong | Tag::Link(..) => self.inline.push(']'),
            Tag::Image(..) => {
                if let Some(image) = self.image.take() {
                    self.inline.push_str("#[img(src=\"");
                    self.inline.push_str(&escape_attr(&image.url));
                    self.inline.push_str("\", alt=\"");
                    self.inline.push_str(&escape_attr(&image.alt));
                    if !image.title.is_empty() {
                        self.inline.push_str("\", title=\"");
                        self.inline.push_str(&escape_attr(&image.title));
                    }
                    self.inline.push_str("\")]");
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(image) = &mut self.image {
            image.alt.push_str(text);
        } else if let Some(code) = &mut self.code {
            code.push_str(&escape_text(text));
        } else {
            if let Some(heading) = &mut self.heading_plain {
                heading.push_str(text);
            }
            self.inline.push_str(&escape_text(text));
        }
    }

    fn start_code_block(&mut self, kind: &CodeBlockKind<'_>) {
        self.flush_inline();
        self.line("pre");
        self.indent += 1;

        let language = match kind {
            CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
            CodeBlockKind::Indented => None,
        };

        let mut tag = String::from("code");
        if self.syntax_highlight {
            tag.push_str(".hljs");
        }
        if let Some(language) = language {
            tag.push_str(".language-");
            tag.push_str(&language);
        }
        self.line(&tag);
        self.indent += 1;
        self.code = Some(String::new());
    }

    fn end_code_block(&mut self) {
        if let Some(code) = self.code.take() {
            let trimmed = code.strip_suffix('\n').unwrap_or(&code);
            if !trimmed.is_empty() {
                for segment in trimmed.split('\n') {
                    if segment.is_empty() {
                        self.line("|");
                    } else {
                        let piped = format!("| {segment}");
                        self.line(&piped);
                    }
                }
            }
        }
        self.indent = self.indent.saturating_sub(2);
    }

    fn start_block(&mut self, tag: &str) {
        self.flush_inline();
        self.line(tag);
        self.stack.push(Frame {
            line_idx: self.lines.len() - 1,
        });
        self.indent += 1;
    }

    fn end_block(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        // Single-line text with no nested blocks goes on the tag line itself.
        if !self.inline.is_empty()
            && !self.inline.contains('\n')
            && frame.line_idx == self.lines.len() - 1
        {
            let text = std::mem::take(&mut self.inline);
            let line = &mut self.lines[frame.line_idx];
            line.push(' ');
            line.push_str(&text);
        } else {
            self.flush_inline();
        }

        self.indent = self.indent.saturating_sub(1);
    }

    fn flush_inline(&mut self) {
        if self.inline.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.inline);
        for segment in text.split('\n') {
            if segment.is_empty() {
                self.line("|");
            } else {
                let piped = format!("| {segment}");
                self.line(&piped);
            }
        }
    }

    fn line(&mut self, content: &str) {
        let mut line = "  ".repeat(self.indent);
        line.push_str(content);
        self.lines.push(line);
    }

    fn finish(mut self) -> String {
        self.flush_inline();
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

const fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Escapes Pug interpolation markers in plain text.
fn escape_text(text: &str) -> String {
    text.replace("#[", "\\#[")
        .replace("#{", "\\#{")
        .replace("!{", "\\!{")
}

/// Escapes double quotes inside attribute values.
fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Derives a heading anchor id from heading text: lowercase, alphanumerics
/// kept, separators collapsed to single hyphens, the rest dropped.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}
