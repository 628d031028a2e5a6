//! Template engine for rendering site pages.

use std::fmt::Write;

use minijinja::{context, AutoEscape, Environment, Error, ErrorKind, Output, State, Value};
use serde::Serialize;

use crate::i18n::Messages;
use crate::seo::PageSeo;

/// A link to the current page in another locale.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleLink {
    pub code: &'static str,
    pub label: &'static str,
    pub path: String,
    pub active: bool,
}

/// A navigation link.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub title: String,
    pub path: String,
    pub active: bool,
}

/// Shared page chrome: head metadata, header, locale switcher, scripts.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub lang: &'static str,
    pub site_name: String,
    pub home_path: String,
    pub seo: PageSeo,
    pub messages: &'static Messages,
    pub nav: Vec<NavItem>,
    pub locales: Vec<LocaleLink>,
    pub stylesheet: &'static str,
    pub script: &'static str,
    /// Include the dev server reload client
    pub live_reload: bool,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_formatter(html_formatter);

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("Failed to add built-in template");
        }

        Self { env }
    }

    /// Render a page template with the shared layout and page-specific data.
    pub fn render_page(
        &self,
        template: &str,
        layout: &Layout,
        page: &impl Serialize,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            layout => layout,
            ..Value::from_serialize(page)
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// HTML escaping that leaves `/` intact so paths and URLs stay readable.
fn html_formatter(out: &mut Output, state: &State, value: &Value) -> Result<(), Error> {
    match value.as_str() {
        Some(text) if !value.is_safe() && matches!(state.auto_escape(), AutoEscape::Html) => {
            out.write_str(&escape_html(text))
                .map_err(|_| Error::new(ErrorKind::WriteFailure, "failed to write output"))
        }
        _ => minijinja::escape_formatter(out, state, value),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const TEMPLATES: [(&str, &str); 8] = [
    ("base.html", BASE_TEMPLATE),
    ("header.html", HEADER_TEMPLATE),
    ("card.html", CARD_TEMPLATE),
    ("home.html", HOME_TEMPLATE),
    ("guide.html", GUIDE_TEMPLATE),
    ("listing.html", LISTING_TEMPLATE),
    ("not_found.html", NOT_FOUND_TEMPLATE),
    ("error.html", ERROR_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ layout.lang }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  {% set seo = layout.seo %}
  <title>{{ seo.title }} | {{ layout.site_name }}</title>
  <meta name="description" content="{{ seo.description }}">
  {% if seo.keywords %}<meta name="keywords" content="{{ seo.keywords | join(', ') }}">
  {% endif %}{% if seo.noindex %}<meta name="robots" content="noindex">
  {% endif %}<link rel="canonical" href="{{ seo.canonical }}">
  {% for alt in seo.alternates %}<link rel="alternate" hreflang="{{ alt.hreflang }}" href="{{ alt.href }}">
  {% endfor %}<meta property="og:title" content="{{ seo.title }}">
  <meta property="og:description" content="{{ seo.description }}">
  <meta property="og:url" content="{{ seo.canonical }}">
  <meta property="og:site_name" content="{{ seo.site_name }}">
  <meta property="og:locale" content="{{ seo.og_locale }}">
  <meta property="og:type" content="{{ seo.og_type }}">
  <meta name="twitter:card" content="{{ seo.twitter_card }}">
  <meta name="twitter:title" content="{{ seo.title }}">
  <meta name="twitter:description" content="{{ seo.description }}">
  {% if seo.json_ld %}<script type="application/ld+json">{{ seo.json_ld | safe }}</script>
  {% endif %}<link rel="stylesheet" href="{{ layout.stylesheet }}">
</head>
<body data-locale="{{ layout.lang }}" data-copy="{{ layout.messages.copy }}" data-copied="{{ layout.messages.copied }}" data-no-results="{{ layout.messages.search_no_results }}">
  {% include "header.html" %}
  <main class="main">
    {% block content %}{% endblock %}
  </main>
  <footer class="site-footer">
    <p>{{ layout.site_name }} · {{ layout.messages.tagline }}</p>
  </footer>
  <script src="{{ layout.script }}" defer></script>
  {% if layout.live_reload %}<script src="/__hmr.js"></script>
  {% endif %}
</body>
</html>"##;

const HEADER_TEMPLATE: &str = r##"<header class="site-header">
  <a href="{{ layout.home_path }}" class="logo">{{ layout.site_name }}</a>
  <nav class="site-nav">
    {% for item in layout.nav %}<a href="{{ item.path }}"{% if item.active %} class="active"{% endif %}>{{ item.title }}</a>
    {% endfor %}
  </nav>
  <div class="search" data-search>
    <input type="search" class="search-input" placeholder="{{ layout.messages.search_placeholder }}" aria-label="{{ layout.messages.search_placeholder }}">
    <ul class="search-results" hidden></ul>
  </div>
  <nav class="locale-switcher">
    {% for loc in layout.locales %}<a href="{{ loc.path }}" hreflang="{{ loc.code }}"{% if loc.active %} class="active" aria-current="true"{% endif %}>{{ loc.label }}</a>
    {% endfor %}
  </nav>
</header>"##;

const CARD_TEMPLATE: &str = r##"<a class="guide-card" href="{{ guide.path }}">
  <div class="guide-card-body">
    <h3>{{ guide.title }}</h3>
    <p>{{ guide.description }}</p>
  </div>
  <div class="badges">
    <span class="badge">{{ guide.platform_name }}</span>
    <span class="badge badge-{{ guide.difficulty_key }}">{{ guide.difficulty }}</span>
    <span class="badge badge-outline">{{ guide.minutes }} {{ layout.messages.minutes }}</span>
  </div>
</a>"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="hero">
  <h1>{{ layout.site_name }}</h1>
  <p>{{ layout.messages.tagline }}</p>
</section>

<section class="platforms">
  <h2>{{ layout.messages.platforms }}</h2>
  <ul class="platform-grid">
  {% for platform in platforms %}
    <li><a href="{{ platform.path }}" class="platform-card">{{ platform.name }} <span class="count">{{ platform.count }}</span></a></li>
  {% endfor %}
  </ul>
</section>

<section class="categories">
  <h2>{{ layout.messages.categories }}</h2>
  <ul class="category-list">
  {% for category in categories %}
    <li><a href="{{ category.path }}">{{ category.name }} <span class="count">{{ category.count }}</span></a></li>
  {% endfor %}
  </ul>
</section>

<section class="guides">
  <h2>{{ layout.messages.all_guides }} <span class="count">({{ guides | length }})</span></h2>
  <div class="guide-list">
  {% for guide in guides %}
    {% include "card.html" %}
  {% endfor %}
  </div>
</section>
{% endblock %}"##;

const GUIDE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="progress" data-progress data-total-steps="{{ total_steps }}">
  <span class="progress-label">{{ layout.messages.step }} <span data-progress-current>1</span> / {{ total_steps }}</span>
  <div class="progress-track"><div class="progress-fill" data-progress-fill></div></div>
  <span class="progress-percent" data-progress-percent>0%</span>
</div>

<div class="guide-layout">
  <article class="guide">
    <header class="guide-header">
      <h1>{{ title }}</h1>
      <p class="guide-description">{{ description }}</p>
      <div class="badges">
        <a class="badge" href="{{ platform_path }}">{{ platform_name }}</a>
        <span class="badge badge-{{ difficulty_key }}">{{ difficulty }}</span>
        <span class="badge badge-outline">{{ minutes }} {{ layout.messages.minutes }}</span>
        {% if service %}<span class="badge badge-outline">{{ layout.messages.service }}: {{ service }}</span>{% endif %}
      </div>
      <p class="guide-verified">{{ layout.messages.last_verified }}: <time datetime="{{ last_verified }}">{{ last_verified }}</time></p>
    </header>

    {% if free_tier %}
    <aside class="free-tier free-tier-{{ free_tier.status }}">
      <h2 class="free-tier-title">{{ layout.messages.free_tier }}</h2>
      <p><strong>{{ free_tier.service }}</strong>: {{ free_tier.limit }}{% if free_tier.amount %} ({{ free_tier.amount }}){% endif %} / {{ free_tier.period }}</p>
      {% if free_tier.conditions %}
      <p>{{ layout.messages.conditions }}:</p>
      <ul>{% for condition in free_tier.conditions %}<li>{{ condition }}</li>{% endfor %}</ul>
      {% endif %}
    </aside>
    {% endif %}

    {% if prerequisites %}
    <aside class="prerequisites">
      <h2 class="aside-title">{{ layout.messages.prerequisites }}</h2>
      <ul>{% for guide in prerequisites %}<li><a href="{{ guide.path }}">{{ guide.title }}</a></li>{% endfor %}</ul>
    </aside>
    {% endif %}

    <div class="content">
      {{ content | safe }}
    </div>

    {% if next_guides %}
    <nav class="next-guides">
      <h2 class="aside-title">{{ layout.messages.next_guides }}</h2>
      <div class="guide-list">
      {% for guide in next_guides %}
        {% include "card.html" %}
      {% endfor %}
      </div>
    </nav>
    {% endif %}
  </article>

  {% if toc %}
  <aside class="toc" data-toc>
    <h2>{{ layout.messages.toc }}</h2>
    <ul>
    {% for entry in toc %}
      <li><a href="#{{ entry.id }}" data-toc-link="{{ entry.id }}">{{ entry.step }}. {{ entry.title }}</a></li>
    {% endfor %}
    </ul>
  </aside>
  {% endif %}
</div>
{% endblock %}"##;

const LISTING_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="listing">
  <h1>{{ heading }}</h1>
  {% if description %}<p class="listing-description">{{ description }}</p>{% endif %}
  <h2>{{ layout.messages.available_guides }} <span class="count">({{ guides | length }})</span></h2>
  {% if guides %}
  <div class="guide-list">
  {% for guide in guides %}
    {% include "card.html" %}
  {% endfor %}
  </div>
  {% else %}
  <p class="empty">{{ empty_message }}</p>
  {% endif %}
</section>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="not-found">
  <h1>{{ layout.messages.not_found_title }}</h1>
  <p>{{ layout.messages.not_found_body }}</p>
  <a class="button" href="{{ layout.home_path }}">{{ layout.messages.back_to_catalog }}</a>
</section>
{% endblock %}"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="content-error">
  <h1>{{ layout.messages.error_title }}</h1>
  <pre>{{ message }}</pre>
</section>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::SiteOrigin;
    use cloudsetup_content::Locale;

    fn layout() -> Layout {
        let origin = SiteOrigin::parse("https://cloudsetup.guide").unwrap();
        Layout {
            lang: "en",
            site_name: "CloudSetup.guide".to_string(),
            home_path: "/en".to_string(),
            seo: PageSeo::page(&origin, "CloudSetup.guide", Locale::En, "Home", "Guides <b>", |l| {
                format!("/{}", l)
            }),
            messages: Messages::for_locale(Locale::En),
            nav: vec![NavItem {
                title: "Google Cloud".to_string(),
                path: "/en/platforms/gcp".to_string(),
                active: true,
            }],
            locales: vec![
                LocaleLink {
                    code: "ko",
                    label: "한국어",
                    path: "/ko".to_string(),
                    active: false,
                },
                LocaleLink {
                    code: "en",
                    label: "English",
                    path: "/en".to_string(),
                    active: true,
                },
            ],
            stylesheet: "/assets/main.css",
            script: "/assets/main.js",
            live_reload: false,
        }
    }

    #[test]
    fn renders_not_found_page() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page("not_found.html", &layout(), &serde_json::json!({}))
            .unwrap();

        assert!(html.contains("<title>Home | CloudSetup.guide</title>"));
        assert!(html.contains("Guide not found"));
        assert!(html.contains("href=\"/en\""));
        assert!(html.contains("hreflang=\"x-default\""));
        assert!(!html.contains("/__hmr.js"));
    }

    #[test]
    fn escapes_metadata() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page("not_found.html", &layout(), &serde_json::json!({}))
            .unwrap();

        assert!(html.contains("Guides &lt;b&gt;"));
        assert!(html.contains("href=\"https://cloudsetup.guide/en\""));
    }

    #[test]
    fn renders_listing_with_empty_message() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page(
                "listing.html",
                &layout(),
                &serde_json::json!({
                    "heading": "Microsoft Azure",
                    "description": null,
                    "guides": [],
                    "empty_message": "No guides available for this platform yet. Coming soon!",
                }),
            )
            .unwrap();

        assert!(html.contains("<h1>Microsoft Azure</h1>"));
        assert!(html.contains("Coming soon!"));
        assert!(html.contains("(0)"));
    }

    #[test]
    fn includes_reload_client_when_enabled() {
        let engine = TemplateEngine::new();
        let mut layout = layout();
        layout.live_reload = true;

        let html = engine
            .render_page("error.html", &layout, &serde_json::json!({ "message": "bad meta" }))
            .unwrap();

        assert!(html.contains("/__hmr.js"));
        assert!(html.contains("<pre>bad meta</pre>"));
    }
}
