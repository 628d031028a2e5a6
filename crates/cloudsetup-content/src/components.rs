//! Guide components embedded in MDX bodies.
//!
//! Guide authors write JSX-style tags such as
//! `<Screenshot src="/screenshots/gcp/step-1.png" alt="Console" />` or
//! `<Callout type="warning">…</Callout>`. Before markdown rendering, each
//! known component is expanded into plain HTML (or markdown, for step titles)
//! that the site stylesheet and script understand. Tags inside code spans
//! and code blocks are left alone, as are unknown components.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;

use crate::document::options;
use crate::guide::Locale;

static COMPONENT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:Step|Screenshot|CopyBlock|Callout|FreeTierInfo)\b").unwrap()
});

static HIGHLIGHT_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(x|y|width|height)\s*:\s*(-?\d+(?:\.\d+)?)").unwrap()
});

/// A component available to guide bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Step,
    Screenshot,
    CopyBlock,
    Callout,
    FreeTierInfo,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::Step,
        Component::Screenshot,
        Component::CopyBlock,
        Component::Callout,
        Component::FreeTierInfo,
    ];

    /// Tag name as written in guide bodies.
    pub fn name(self) -> &'static str {
        match self {
            Component::Step => "Step",
            Component::Screenshot => "Screenshot",
            Component::CopyBlock => "CopyBlock",
            Component::Callout => "Callout",
            Component::FreeTierInfo => "FreeTierInfo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    fn render(self, props: &Props, children: &str, locale: Locale) -> String {
        match self {
            Component::Step => render_step(props, children, locale),
            Component::Screenshot => render_screenshot(props),
            Component::CopyBlock => render_copy_block(props, children),
            Component::Callout => render_callout(props, children, locale),
            Component::FreeTierInfo => render_free_tier(props, locale),
        }
    }
}

/// A prop value as written on a component tag.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// String literal: `alt="Console"`
    String(String),
    /// Presence only: `priority`
    Boolean(bool),
    /// Braced expression: `number={2}`
    Expression(String),
}

impl PropValue {
    /// Text content of the value.
    ///
    /// Expressions that are themselves string or template literals are unwrapped.
    pub fn text(&self) -> Option<String> {
        match self {
            PropValue::String(s) => Some(s.clone()),
            PropValue::Boolean(_) => None,
            PropValue::Expression(expr) => {
                let expr = expr.trim();
                let quoted = ['`', '"', '\'']
                    .into_iter()
                    .any(|q| expr.len() >= 2 && expr.starts_with(q) && expr.ends_with(q));
                if quoted {
                    Some(expr[1..expr.len() - 1].replace("\\`", "`"))
                } else {
                    Some(expr.to_string())
                }
            }
        }
    }
}

type Props = HashMap<String, PropValue>;

fn text_prop(props: &Props, name: &str) -> Option<String> {
    props.get(name).and_then(PropValue::text)
}

fn flag_prop(props: &Props, name: &str) -> bool {
    match props.get(name) {
        Some(PropValue::Boolean(b)) => *b,
        Some(PropValue::Expression(e)) => e.trim() == "true",
        _ => false,
    }
}

/// An opening tag parsed from the body.
#[derive(Debug, Clone, PartialEq)]
struct OpenTag {
    name: String,
    props: Props,
    self_closing: bool,
    /// Length of the tag in bytes, including `>` or `/>`
    len: usize,
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, s: &str) -> bool {
        if self.src[self.pos..].starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    /// Read up to the closing `quote`, honoring backslash escapes.
    fn quoted(&mut self, quote: char) -> Option<&'a str> {
        let start = self.pos;
        loop {
            match self.bump()? {
                '\\' => {
                    self.bump()?;
                }
                c if c == quote => return Some(&self.src[start..self.pos - quote.len_utf8()]),
                _ => {}
            }
        }
    }

    /// Read a braced expression after its opening `{`, balancing nested braces.
    fn braced(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let mut depth = 1;
        loop {
            match self.bump()? {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&self.src[start..self.pos - 1]);
                    }
                }
                q @ ('"' | '\'' | '`') => {
                    self.quoted(q)?;
                }
                _ => {}
            }
        }
    }
}

/// Parse an opening or self-closing tag at the start of `source`.
fn parse_open_tag(source: &str) -> Option<OpenTag> {
    let mut scanner = Scanner { src: source, pos: 0 };
    if !scanner.eat("<") {
        return None;
    }

    let name = scanner.ident();
    if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }

    let mut props = Props::new();
    loop {
        scanner.skip_whitespace();
        if scanner.eat("/>") {
            return Some(OpenTag {
                name: name.to_string(),
                props,
                self_closing: true,
                len: scanner.pos,
            });
        }
        if scanner.eat(">") {
            return Some(OpenTag {
                name: name.to_string(),
                props,
                self_closing: false,
                len: scanner.pos,
            });
        }

        let key = scanner.ident();
        if key.is_empty() {
            return None;
        }

        scanner.skip_whitespace();
        let value = if scanner.eat("=") {
            scanner.skip_whitespace();
            match scanner.bump()? {
                q @ ('"' | '\'') => PropValue::String(scanner.quoted(q)?.to_string()),
                '{' => PropValue::Expression(scanner.braced()?.to_string()),
                _ => return None,
            }
        } else {
            PropValue::Boolean(true)
        };
        props.insert(key.to_string(), value);
    }
}

/// Find the `</name>` closing the element whose children start at `from`.
fn find_close_tag(source: &str, name: &str, from: usize) -> Option<usize> {
    let open = format!("<{}", name);
    let close = format!("</{}>", name);
    let mut depth = 1;
    let mut pos = from;

    while let Some(offset) = source[pos..].find('<') {
        let at = pos + offset;
        let rest = &source[at..];

        if rest.starts_with(&close) {
            depth -= 1;
            if depth == 0 {
                return Some(at);
            }
            pos = at + close.len();
        } else if rest.starts_with(&open) {
            match parse_open_tag(rest) {
                Some(tag) if tag.name == name => {
                    if !tag.self_closing {
                        depth += 1;
                    }
                    pos = at + tag.len;
                }
                _ => pos = at + 1,
            }
        } else {
            pos = at + 1;
        }
    }

    None
}

/// Byte ranges of code blocks and code spans.
fn code_ranges(source: &str) -> Vec<Range<usize>> {
    Parser::new_ext(source, options())
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_)) | Event::Code(_) => Some(range),
            _ => None,
        })
        .collect()
}

/// Expand every known component tag in a guide body.
pub fn expand_components(source: &str, locale: Locale) -> String {
    if !COMPONENT_TAG.is_match(source) {
        return source.to_string();
    }

    let code = code_ranges(source);
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    for found in COMPONENT_TAG.find_iter(source) {
        let start = found.start();
        if start < cursor || code.iter().any(|r| r.contains(&start)) {
            continue;
        }

        let Some(tag) = parse_open_tag(&source[start..]) else {
            continue;
        };
        let Some(component) = Component::from_name(&tag.name) else {
            continue;
        };

        let open_end = start + tag.len;
        let (children, end) = if tag.self_closing {
            ("", open_end)
        } else {
            match find_close_tag(source, &tag.name, open_end) {
                Some(at) => (&source[open_end..at], at + tag.name.len() + 3),
                None => {
                    tracing::warn!("Unclosed <{}> left as written", tag.name);
                    continue;
                }
            }
        };

        out.push_str(&source[cursor..start]);
        out.push_str(&component.render(&tag.props, children, locale));
        cursor = end;
    }

    out.push_str(&source[cursor..]);
    out
}

/// Remove the indentation shared by every non-blank line.
fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}

/// Nested markdown body of a container component.
fn inner_markdown(children: &str, locale: Locale) -> String {
    expand_components(&dedent(children), locale)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct Labels {
    minutes: &'static str,
    free_tier: &'static str,
    limit: &'static str,
    overage: &'static str,
}

fn labels(locale: Locale) -> Labels {
    match locale {
        Locale::Ko => Labels {
            minutes: "분 소요",
            free_tier: "무료 한도",
            limit: "한도:",
            overage: "초과 시:",
        },
        Locale::En => Labels {
            minutes: "min",
            free_tier: "Free tier",
            limit: "Limit:",
            overage: "Overage:",
        },
    }
}

/// `<Step number title estimatedMinutes>` becomes a section whose title is a
/// level-2 markdown heading, so it is numbered and listed like any other step.
fn render_step(props: &Props, children: &str, locale: Locale) -> String {
    let number = text_prop(props, "number").and_then(|n| n.trim().parse::<usize>().ok());
    let title = text_prop(props, "title").map(|t| single_line(&t)).unwrap_or_default();

    let mut html = match number {
        Some(n) => format!("\n\n<section class=\"step\" data-step=\"{}\">\n\n", n),
        None => "\n\n<section class=\"step\">\n\n".to_string(),
    };

    if !title.is_empty() {
        html.push_str("## ");
        html.push_str(&title);
        if let Some(n) = number {
            html.push_str(&format!(" {{#step-{}}}", n));
        }
        html.push_str("\n\n");
    }

    if let Some(minutes) = text_prop(props, "estimatedMinutes").and_then(|m| m.trim().parse::<u32>().ok()) {
        let label = labels(locale).minutes;
        let text = match locale {
            Locale::Ko => format!("{}{}", minutes, label),
            Locale::En => format!("{} {}", minutes, label),
        };
        html.push_str(&format!("<p class=\"step-time\">{}</p>\n\n", text));
    }

    html.push_str(&inner_markdown(children, locale));
    html.push_str("\n\n</section>\n\n");
    html
}

/// Highlight box as `left; top; width; height` percentages.
fn highlight_style(expr: &str) -> Option<String> {
    let fields: HashMap<&str, &str> = HIGHLIGHT_FIELD
        .captures_iter(expr)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect();

    Some(format!(
        "left: {}%; top: {}%; width: {}%; height: {}%",
        fields.get("x")?,
        fields.get("y")?,
        fields.get("width")?,
        fields.get("height")?
    ))
}

fn render_screenshot(props: &Props) -> String {
    let Some(src) = text_prop(props, "src") else {
        tracing::warn!("<Screenshot> without src skipped");
        return String::new();
    };
    let alt = text_prop(props, "alt").unwrap_or_default();
    let loading = if flag_prop(props, "priority") { "eager" } else { "lazy" };

    let mut html = String::from("\n\n<figure class=\"screenshot\">\n<div class=\"screenshot-frame\">\n");
    html.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\" width=\"1200\" height=\"800\" loading=\"{}\">",
        escape(&src),
        escape(&alt),
        loading
    ));
    if let Some(style) = props
        .get("highlight")
        .and_then(PropValue::text)
        .and_then(|expr| highlight_style(&expr))
    {
        html.push_str(&format!(
            "<span class=\"screenshot-highlight\" style=\"{}\"></span>",
            style
        ));
    }
    html.push_str("\n</div>\n");

    if let Some(caption) = text_prop(props, "caption").filter(|c| !c.trim().is_empty()) {
        html.push_str(&format!("<figcaption>{}</figcaption>\n", escape(&single_line(&caption))));
    }

    html.push_str("</figure>\n\n");
    html
}

/// `<CopyBlock code language>` becomes a `pre` block, which picks up the copy button.
/// The code may also be given as the element's children.
fn render_copy_block(props: &Props, children: &str) -> String {
    let code = text_prop(props, "code").unwrap_or_else(|| dedent(children));
    let language = text_prop(props, "language").unwrap_or_else(|| "bash".to_string());

    format!(
        "\n\n<pre class=\"copy-block\"><code class=\"language-{}\">{}</code></pre>\n\n",
        escape(&language),
        escape(code.trim_matches('\n'))
    )
}

fn render_callout(props: &Props, children: &str, locale: Locale) -> String {
    let kind = match text_prop(props, "type").as_deref() {
        Some("warning") => "warning",
        Some("danger") => "danger",
        Some("tip") => "tip",
        _ => "info",
    };
    let icon = match kind {
        "warning" => "⚠️",
        "danger" => "❌",
        "tip" => "💡",
        _ => "ℹ️",
    };

    format!(
        "\n\n<aside class=\"callout callout-{kind}\" role=\"note\">\n\
         <span class=\"callout-icon\" aria-hidden=\"true\">{icon}</span>\n\
         <div class=\"callout-body\">\n\n{body}\n\n</div>\n</aside>\n\n",
        body = inner_markdown(children, locale)
    )
}

fn render_free_tier(props: &Props, locale: Locale) -> String {
    let labels = labels(locale);
    let service = text_prop(props, "service").unwrap_or_default();
    let limit = text_prop(props, "limit").unwrap_or_default();

    let mut html = String::from("\n\n<div class=\"free-tier-box\">\n");
    html.push_str(&format!(
        "<p class=\"free-tier-box-head\"><span class=\"badge\">{}</span> <strong>{}</strong></p>\n",
        labels.free_tier,
        escape(&service)
    ));
    html.push_str(&format!(
        "<p><strong>{}</strong> {}</p>\n",
        labels.limit,
        escape(&limit)
    ));
    if let Some(overage) = text_prop(props, "overage") {
        html.push_str(&format!(
            "<p class=\"free-tier-overage\"><strong>{}</strong> {}</p>\n",
            labels.overage,
            escape(&overage)
        ));
    }
    html.push_str("</div>\n\n");
    html
}
