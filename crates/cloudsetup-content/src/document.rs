//! Guide body rendering.

use std::collections::HashMap;
use std::sync::LazyLock;

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;

use crate::components::expand_components;
use crate::guide::Locale;

/// MDX module lines (`import`/`export`) carry no prose and are dropped before rendering.
static MDX_ESM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:import|export)\s[^\n]*\n?").unwrap());

/// A rendered guide body.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Body HTML with heading ids
    pub html: String,

    /// Table of contents entries, in document order
    pub toc: Vec<TocEntry>,

    /// Number of step headings found
    pub steps: usize,
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
    /// Step number for level-2 headings (1-indexed)
    pub step: Option<usize>,
}

pub(crate) fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render a guide body to HTML with the default locale's component labels.
pub fn render_document(body: &str) -> RenderedDocument {
    render_localized(body, Locale::default())
}

/// Render a guide body to HTML.
///
/// Guide components (`<Step>`, `<Screenshot>`, `<CopyBlock>`, `<Callout>`,
/// `<FreeTierInfo>`) are expanded first, with labels in `locale`.
/// Level-2 headings are the guide's steps and get ids `step-1`, `step-2`, ...
/// Other headings get a slug of their text, made unique within the document.
pub fn render_localized(body: &str, locale: Locale) -> RenderedDocument {
    let source = expand_components(&MDX_ESM.replace_all(body, ""), locale);
    let parser = Parser::new_ext(&source, options());

    let mut events: Vec<Event> = Vec::new();
    let mut toc = Vec::new();
    let mut used_ids: HashMap<String, usize> = HashMap::new();
    let mut steps = 0;

    // (level, explicit id, buffered inner events, plain text)
    let mut current_heading: Option<(u8, Option<String>, Vec<Event>, String)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current_heading = Some((level as u8, id.map(|i| i.to_string()), Vec::new(), String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                let Some((level, explicit_id, inner, title)) = current_heading.take() else {
                    continue;
                };
                let title = title.trim().to_string();

                let step = (level == 2).then(|| {
                    steps += 1;
                    steps
                });

                let base = match (&explicit_id, step) {
                    (Some(id), _) => slugify(id),
                    (None, Some(n)) => format!("step-{}", n),
                    (None, None) => slugify(&title),
                };
                let id = unique_id(base, &mut used_ids);

                events.push(Event::Html(CowStr::from(format!("<h{} id=\"{}\">", level, id))));
                events.extend(inner);
                events.push(Event::Html(CowStr::from(format!("</h{}>\n", level))));

                toc.push(TocEntry {
                    title,
                    id,
                    level,
                    step,
                });
            }

            other => {
                if let Some((_, _, inner, text)) = current_heading.as_mut() {
                    if let Event::Text(t) | Event::Code(t) = &other {
                        text.push_str(t);
                    }
                    inner.push(other);
                } else {
                    events.push(other);
                }
            }
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    RenderedDocument {
        html: html_output,
        toc,
        steps,
    }
}

/// Extract plain prose from a body for the search index.
///
/// Code blocks and raw HTML/MDX tags are skipped; whitespace is collapsed.
pub fn plain_text(body: &str) -> String {
    let source = expand_components(&MDX_ESM.replace_all(body, ""), Locale::default());
    let mut in_code_block = false;
    let mut words: Vec<String> = Vec::new();

    for event in Parser::new_ext(&source, options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) | Event::Code(text) if !in_code_block => {
                words.extend(text.split_whitespace().map(str::to_string));
            }
            _ => {}
        }
    }

    words.join(" ")
}

fn unique_id(base: String, used: &mut HashMap<String, usize>) -> String {
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };

    let count = used.entry(base.clone()).or_insert(0);
    *count += 1;

    if *count == 1 {
        base
    } else {
        format!("{}-{}", base, *count - 1)
    }
}

/// Convert a heading to a URL-safe slug. Non-ASCII letters such as Hangul are kept.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
