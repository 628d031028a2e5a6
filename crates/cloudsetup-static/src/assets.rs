//! Asset pipeline for the site stylesheet and runtime script.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// The stylesheet as it should be served: minified when requested, falling
    /// back to the readable source if minification fails.
    pub fn stylesheet(minify: bool) -> String {
        let css = Self::generate_css();
        if !minify {
            return css;
        }

        match Self::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Serving unminified stylesheet: {}", e);
                css
            }
        }
    }
}

const DEFAULT_CSS: &str = r#"/* CloudSetup.guide theme */

:root {
  --background: #ffffff;
  --foreground: #0f172a;
  --muted: #f1f5f9;
  --muted-foreground: #64748b;
  --border: #e2e8f0;
  --primary: #2563eb;
  --primary-foreground: #ffffff;
  --card: #f8fafc;
  --radius: 0.5rem;
  --content-max-width: 820px;
  --toc-width: 240px;
  --header-height: 4rem;
}

@media (prefers-color-scheme: dark) {
  :root {
    --background: #0b1120;
    --foreground: #e2e8f0;
    --muted: #1e293b;
    --muted-foreground: #94a3b8;
    --border: #334155;
    --card: #111827;
  }
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, "Apple SD Gothic Neo", "Noto Sans KR", sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.7;
  word-break: keep-all;
}

a {
  color: inherit;
}

/* Header */
.site-header {
  position: sticky;
  top: 0;
  z-index: 50;
  display: flex;
  align-items: center;
  gap: 1.5rem;
  height: var(--header-height);
  padding: 0 1.5rem;
  background: var(--background);
  border-bottom: 1px solid var(--border);
}

.logo {
  font-weight: 700;
  font-size: 1.125rem;
  text-decoration: none;
}

.site-nav {
  display: flex;
  gap: 1rem;
  flex: 1;
}

.site-nav a,
.locale-switcher a {
  color: var(--muted-foreground);
  text-decoration: none;
  font-size: 0.875rem;
}

.site-nav a.active,
.locale-switcher a.active {
  color: var(--primary);
  font-weight: 600;
}

.locale-switcher {
  display: flex;
  gap: 0.75rem;
}

/* Search */
.search {
  position: relative;
}

.search-input {
  width: 16rem;
  padding: 0.4rem 0.75rem;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  background: var(--background);
  color: var(--foreground);
}

.search-results {
  position: absolute;
  top: 110%;
  right: 0;
  width: 24rem;
  max-height: 60vh;
  overflow-y: auto;
  list-style: none;
  background: var(--background);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  box-shadow: 0 8px 24px rgba(15, 23, 42, 0.12);
}

.search-results li a {
  display: block;
  padding: 0.75rem 1rem;
  text-decoration: none;
}

.search-results li a:hover {
  background: var(--muted);
}

.search-results .excerpt {
  display: block;
  font-size: 0.8rem;
  color: var(--muted-foreground);
}

.search-results .empty {
  padding: 0.75rem 1rem;
  color: var(--muted-foreground);
}

/* Layout */
.main {
  max-width: calc(var(--content-max-width) + var(--toc-width) + 4rem);
  margin: 0 auto;
  padding: 2rem 1.5rem 4rem;
}

.site-footer {
  padding: 2rem 1.5rem;
  border-top: 1px solid var(--border);
  color: var(--muted-foreground);
  font-size: 0.875rem;
  text-align: center;
}

.hero {
  padding: 3rem 0 2rem;
}

.hero h1 {
  font-size: 2.5rem;
}

.hero p,
.listing-description,
.guide-description {
  color: var(--muted-foreground);
  font-size: 1.125rem;
}

section + section {
  margin-top: 2.5rem;
}

h2 .count,
.count {
  color: var(--muted-foreground);
  font-weight: 400;
}

.platform-grid,
.category-list {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(12rem, 1fr));
  gap: 0.75rem;
  list-style: none;
  margin-top: 1rem;
}

.platform-card,
.category-list a {
  display: flex;
  justify-content: space-between;
  padding: 1rem;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  text-decoration: none;
}

.platform-card:hover,
.category-list a:hover,
.guide-card:hover {
  border-color: var(--primary);
}

/* Guide cards */
.guide-list {
  display: flex;
  flex-direction: column;
  gap: 1rem;
  margin-top: 1rem;
}

.guide-card {
  display: flex;
  justify-content: space-between;
  gap: 1rem;
  padding: 1.25rem;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  text-decoration: none;
  transition: border-color 0.15s;
}

.guide-card p {
  color: var(--muted-foreground);
  font-size: 0.9rem;
}

.badges {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
  align-items: flex-start;
}

.badge {
  padding: 0.125rem 0.625rem;
  border-radius: 999px;
  background: var(--muted);
  font-size: 0.75rem;
  white-space: nowrap;
  text-decoration: none;
}

.badge-outline {
  background: none;
  border: 1px solid var(--border);
}

.badge-beginner { color: #15803d; }
.badge-intermediate { color: #b45309; }
.badge-advanced { color: #b91c1c; }

.empty {
  padding: 3rem 0;
  text-align: center;
  color: var(--muted-foreground);
}

/* Guide page */
.progress {
  position: sticky;
  top: var(--header-height);
  z-index: 40;
  display: flex;
  align-items: center;
  gap: 1rem;
  padding: 0.75rem 0;
  background: var(--background);
  border-bottom: 1px solid var(--border);
  font-size: 0.875rem;
}

.progress-track {
  flex: 1;
  height: 0.5rem;
  background: var(--muted);
  border-radius: 999px;
  overflow: hidden;
}

.progress-fill {
  width: 0;
  height: 100%;
  background: var(--primary);
  transition: width 0.3s;
}

.progress-percent {
  color: var(--muted-foreground);
}

.guide-layout {
  display: grid;
  grid-template-columns: minmax(0, 1fr) var(--toc-width);
  gap: 3rem;
  margin-top: 2rem;
}

.guide-header h1 {
  font-size: 2.25rem;
  line-height: 1.3;
  margin-bottom: 0.75rem;
}

.guide-header .badges {
  margin: 1rem 0 0.5rem;
}

.guide-verified {
  font-size: 0.8rem;
  color: var(--muted-foreground);
}

.free-tier,
.prerequisites {
  margin: 1.5rem 0;
  padding: 1rem 1.25rem;
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: var(--radius);
}

.free-tier-generous { border-left: 4px solid #16a34a; }
.free-tier-moderate { border-left: 4px solid #2563eb; }
.free-tier-limited { border-left: 4px solid #d97706; }
.free-tier-none { border-left: 4px solid #dc2626; }

.free-tier-title,
.aside-title {
  font-size: 1rem;
  margin-bottom: 0.5rem;
}

.free-tier ul,
.prerequisites ul {
  padding-left: 1.25rem;
}

.next-guides {
  margin-top: 3rem;
}

.content h1 { font-size: 2rem; margin: 2rem 0 1rem; }

.content h2 {
  font-size: 1.5rem;
  margin: 2.5rem 0 1rem;
  padding-bottom: 0.5rem;
  border-bottom: 1px solid var(--border);
  scroll-margin-top: calc(var(--header-height) + 4rem);
}

.content h3 {
  font-size: 1.2rem;
  margin: 1.5rem 0 0.75rem;
  scroll-margin-top: calc(var(--header-height) + 4rem);
}

.content p,
.content ul,
.content ol,
.content table,
.content blockquote {
  margin-bottom: 1rem;
}

.content ul,
.content ol {
  padding-left: 1.5rem;
}

.content a {
  color: var(--primary);
  text-underline-offset: 4px;
}

.content img {
  max-width: 100%;
  border: 1px solid var(--border);
  border-radius: var(--radius);
}

.content blockquote {
  padding: 0.75rem 1rem;
  border-left: 4px solid var(--primary);
  background: var(--card);
}

.content table {
  width: 100%;
  border-collapse: collapse;
}

.content th,
.content td {
  padding: 0.5rem;
  border: 1px solid var(--border);
  text-align: left;
}

.content pre {
  position: relative;
  padding: 1rem;
  margin-bottom: 1rem;
  overflow-x: auto;
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  font-size: 0.875rem;
}

.content code {
  font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
  font-size: 0.875em;
  padding: 0.125rem 0.375rem;
  background: var(--muted);
  border-radius: 0.25rem;
}

.content pre code {
  padding: 0;
  background: none;
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  padding: 0.25rem 0.75rem;
  font-size: 0.75rem;
  background: var(--muted);
  color: var(--foreground);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  cursor: pointer;
}

/* Guide components */
.step {
  margin-bottom: 3rem;
}

.step-time {
  margin-top: -0.5rem;
  font-size: 0.875rem;
  color: var(--muted-foreground);
}

.screenshot {
  margin: 1.5rem 0;
}

.screenshot-frame {
  position: relative;
  overflow: hidden;
  border: 1px solid var(--border);
  border-radius: var(--radius);
}

.screenshot-frame img {
  display: block;
  width: 100%;
  height: auto;
  border: none;
  border-radius: 0;
}

.screenshot-highlight {
  position: absolute;
  border: 4px solid #ef4444;
  pointer-events: none;
}

.screenshot figcaption {
  margin-top: 0.5rem;
  font-size: 0.875rem;
  text-align: center;
  color: var(--muted-foreground);
}

.callout {
  display: flex;
  gap: 0.5rem;
  margin: 1rem 0;
  padding: 1rem;
  border-left: 4px solid;
  border-radius: 0 var(--radius) var(--radius) 0;
}

.callout-icon {
  font-size: 1.125rem;
  line-height: 1.5;
}

.callout-body > :last-child {
  margin-bottom: 0;
}

.callout-info { background: #eff6ff; border-color: #bfdbfe; color: #1e3a8a; }
.callout-warning { background: #fefce8; border-color: #fef08a; color: #713f12; }
.callout-danger { background: #fef2f2; border-color: #fecaca; color: #7f1d1d; }
.callout-tip { background: #f0fdf4; border-color: #bbf7d0; color: #14532d; }

@media (prefers-color-scheme: dark) {
  .callout-info { background: #172554; border-color: #1e40af; color: #dbeafe; }
  .callout-warning { background: #422006; border-color: #854d0e; color: #fef9c3; }
  .callout-danger { background: #450a0a; border-color: #991b1b; color: #fee2e2; }
  .callout-tip { background: #052e16; border-color: #166534; color: #dcfce7; }
}

.copy-block {
  margin: 1rem 0;
}

.free-tier-box {
  margin: 1rem 0;
  padding: 1rem;
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  font-size: 0.875rem;
}

.free-tier-box p {
  margin-bottom: 0.25rem;
}

.free-tier-box-head {
  display: flex;
  align-items: center;
  gap: 0.5rem;
}

.free-tier-overage {
  color: var(--muted-foreground);
}

/* Table of contents */
.toc {
  position: sticky;
  top: calc(var(--header-height) + 4rem);
  align-self: start;
}

.toc h2 {
  font-size: 0.875rem;
  margin-bottom: 0.75rem;
}

.toc ul {
  list-style: none;
}

.toc li {
  margin-bottom: 0.375rem;
}

.toc a {
  font-size: 0.875rem;
  color: var(--muted-foreground);
  text-decoration: none;
}

.toc a.active {
  color: var(--primary);
  font-weight: 600;
}

.not-found,
.content-error {
  padding: 4rem 0;
  text-align: center;
}

.content-error pre {
  margin-top: 1.5rem;
  padding: 1rem;
  text-align: left;
  white-space: pre-wrap;
  background: var(--card);
  border: 1px solid #dc2626;
  border-radius: var(--radius);
}

.button {
  display: inline-block;
  margin-top: 1.5rem;
  padding: 0.5rem 1.25rem;
  background: var(--primary);
  color: var(--primary-foreground);
  border-radius: var(--radius);
  text-decoration: none;
}

@media (max-width: 1024px) {
  .guide-layout {
    grid-template-columns: 1fr;
  }

  .toc,
  .site-nav {
    display: none;
  }

  .search-input {
    width: 10rem;
  }
}
"#;

const DEFAULT_JS: &str = r#"// CloudSetup.guide runtime
(function() {
  'use strict';

  const body = document.body;
  const locale = body.dataset.locale || document.documentElement.lang;

  // Step progress: the last step heading above the middle of the viewport
  const progress = document.querySelector('[data-progress]');
  const steps = Array.from(document.querySelectorAll('.content h2[id^="step-"]'));

  if (progress) {
    const total = parseInt(progress.dataset.totalSteps, 10) || steps.length || 1;
    const current = progress.querySelector('[data-progress-current]');
    const fill = progress.querySelector('[data-progress-fill]');
    const percent = progress.querySelector('[data-progress-percent]');

    const update = () => {
      let step = 1;
      steps.forEach((heading, index) => {
        if (heading.getBoundingClientRect().top < window.innerHeight / 2) {
          step = index + 1;
        }
      });
      step = Math.min(step, total);
      const value = Math.round((step / total) * 100);
      current.textContent = String(step);
      fill.style.width = value + '%';
      percent.textContent = value + '%';
    };

    window.addEventListener('scroll', update, { passive: true });
    update();
  }

  // Table of contents: highlight the step being read
  const tocLinks = Array.from(document.querySelectorAll('[data-toc-link]'));

  if (tocLinks.length > 0 && 'IntersectionObserver' in window) {
    const setActive = (id) => {
      tocLinks.forEach(link => {
        link.classList.toggle('active', link.dataset.tocLink === id);
      });
    };

    const observer = new IntersectionObserver(entries => {
      entries
        .filter(entry => entry.isIntersecting)
        .forEach(entry => setActive(entry.target.id));
    }, { rootMargin: '0px 0px -66% 0px' });

    steps.forEach(heading => observer.observe(heading));
  }

  // Copy button for code blocks
  const copyLabel = body.dataset.copy || 'Copy';
  const copiedLabel = body.dataset.copied || 'Copied';

  document.querySelectorAll('.content pre').forEach(pre => {
    if (pre.querySelector('.copy-btn')) return;

    const btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.type = 'button';
    btn.textContent = copyLabel;

    btn.addEventListener('click', async () => {
      const code = pre.querySelector('code');
      try {
        await navigator.clipboard.writeText((code || pre).textContent || '');
        btn.textContent = copiedLabel;
      } catch (err) {
        btn.textContent = 'Error';
      }
      setTimeout(() => { btn.textContent = copyLabel; }, 2000);
    });

    pre.appendChild(btn);
  });

  // Search over the static index
  const search = document.querySelector('[data-search]');

  if (search) {
    const input = search.querySelector('.search-input');
    const results = search.querySelector('.search-results');
    const noResults = body.dataset.noResults || 'No results';
    let index = null;

    const load = async () => {
      if (index) return index;
      try {
        const response = await fetch('/search-index.json');
        const entries = await response.json();
        index = entries.filter(entry => entry.locale === locale);
      } catch (err) {
        console.warn('Search index not loaded:', err);
        index = [];
      }
      return index;
    };

    const score = (entry, terms) => {
      const title = entry.title.toLowerCase();
      const haystack = [entry.description, entry.keywords.join(' '), entry.platform, entry.excerpt]
        .join(' ')
        .toLowerCase();
      let total = 0;
      for (const term of terms) {
        if (title.includes(term)) total += 3;
        else if (haystack.includes(term)) total += 1;
        else return 0;
      }
      return total;
    };

    const render = (matches) => {
      results.replaceChildren();
      if (matches.length === 0) {
        const li = document.createElement('li');
        li.className = 'empty';
        li.textContent = noResults;
        results.appendChild(li);
      }
      matches.forEach(entry => {
        const li = document.createElement('li');
        const a = document.createElement('a');
        a.href = entry.url;
        a.textContent = entry.title;
        const excerpt = document.createElement('span');
        excerpt.className = 'excerpt';
        excerpt.textContent = entry.description;
        a.appendChild(excerpt);
        li.appendChild(a);
        results.appendChild(li);
      });
      results.hidden = false;
    };

    input.addEventListener('input', async () => {
      const query = input.value.trim().toLowerCase();
      if (query.length === 0) {
        results.hidden = true;
        return;
      }
      const terms = query.split(/\s+/);
      const entries = await load();
      const matches = entries
        .map(entry => ({ entry, score: score(entry, terms) }))
        .filter(match => match.score > 0)
        .sort((a, b) => b.score - a.score)
        .slice(0, 10)
        .map(match => match.entry);
      render(matches);
    });

    document.addEventListener('click', event => {
      if (!search.contains(event.target)) results.hidden = true;
    });
  }
})();
"#;
