// Navigation link harvesting

use crate::error::{Result, ScanError};
use crate::fetch::shell::collapse_whitespace;
use crate::result::DiscoveredLink;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Regions that plausibly hold primary navigation.
pub static NAV_SELECTORS: &[&str] = &[
    "nav a[href]",
    "header a[href]",
    "[role=\"navigation\"] a[href]",
    "[class*=\"nav\"] a[href]",
    "[class*=\"menu\"] a[href]",
    "[class*=\"dropdown\"] a[href]",
    "[class*=\"mega\"] a[href]",
    "[class*=\"header\"] a[href]",
    "[id*=\"nav\"] a[href]",
    "[id*=\"menu\"] a[href]",
];

/// Longer link text is body copy, not a nav label.
pub const MAX_LINK_TEXT_CHARS: usize = 50;

/// Result of running one CSS selector against a document.
#[derive(Debug)]
pub enum SelectorOutcome<'a> {
    Matched(Vec<ElementRef<'a>>),
    NoMatches,
    Unsupported(String),
}

impl SelectorOutcome<'_> {
    pub fn status(&self) -> SelectorStatus {
        match self {
            SelectorOutcome::Matched(elements) => SelectorStatus::Matched(elements.len()),
            SelectorOutcome::NoMatches => SelectorStatus::NoMatches,
            SelectorOutcome::Unsupported(reason) => SelectorStatus::Unsupported(reason.clone()),
        }
    }
}

/// Owned summary of a [`SelectorOutcome`], kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SelectorStatus {
    Matched(usize),
    NoMatches,
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorReport {
    pub selector: String,
    pub status: SelectorStatus,
}

#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub links: Vec<DiscoveredLink>,
    pub selectors: Vec<SelectorReport>,
}

impl Harvest {
    pub fn unsupported_selectors(&self) -> impl Iterator<Item = &SelectorReport> {
        self.selectors
            .iter()
            .filter(|r| matches!(r.status, SelectorStatus::Unsupported(_)))
    }
}

pub fn query<'a>(document: &'a Html, selector: &str) -> SelectorOutcome<'a> {
    let parsed = match Selector::parse(selector) {
        Ok(parsed) => parsed,
        Err(e) => return SelectorOutcome::Unsupported(e.to_string()),
    };

    let elements: Vec<ElementRef<'a>> = document.select(&parsed).collect();
    if elements.is_empty() {
        SelectorOutcome::NoMatches
    } else {
        SelectorOutcome::Matched(elements)
    }
}

/// Collect unique (url, text) pairs from the page's navigation regions.
pub fn harvest_nav_links(html: &str, base_url: &str) -> Result<Harvest> {
    harvest_with_selectors(html, base_url, NAV_SELECTORS)
}

pub fn harvest_with_selectors(html: &str, base_url: &str, selectors: &[&str]) -> Result<Harvest> {
    let base = Url::parse(base_url)
        .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    let document = Html::parse_document(html);

    let mut harvest = Harvest::default();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for selector in selectors {
        let outcome = query(&document, selector);
        harvest.selectors.push(SelectorReport {
            selector: selector.to_string(),
            status: outcome.status(),
        });

        let SelectorOutcome::Matched(elements) = outcome else {
            continue;
        };

        for element in elements {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let text = collapse_whitespace(&element.text().collect::<String>());
            if text.chars().count() > MAX_LINK_TEXT_CHARS {
                continue;
            }
            let Some(url) = resolve_url(&base, href) else {
                continue;
            };

            if seen.insert((url.clone(), text.clone())) {
                debug!("Found nav link: {} ({:?})", url, text);
                harvest.links.push(DiscoveredLink { url, text });
            }
        }
    }

    Ok(harvest)
}

/// Resolve `href` against `base`. Anchors, `javascript:`, `mailto:` and `tel:`
/// targets, unparseable hrefs and links to another site yield `None`.
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    let lowered = href.to_ascii_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") || !is_same_site(&resolved, base) {
        return None;
    }
    resolved.set_fragment(None);

    Some(resolved.to_string())
}

/// First hostname label, ignoring a leading `www.`.
pub fn site_label(host: &str) -> &str {
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.split('.').next().unwrap_or(host)
}

/// Best-effort same-site check on the first hostname label only: `foo.io` and
/// `foo.com` count as one site, `app.foo.io` and `foo.io` do not.
pub fn is_same_site(url: &Url, base: &Url) -> bool {
    match (url.host_str(), base.host_str()) {
        (Some(host), Some(base_host)) => {
            site_label(host).eq_ignore_ascii_case(site_label(base_host))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Category, classify};

    fn base() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_nav_scenario() {
        let html = r##"<html><body><nav><a href="/partners">Partners</a><a href="#">Skip</a></nav></body></html>"##;

        let harvest = harvest_nav_links(html, "https://example.com").unwrap();

        assert_eq!(
            harvest.links,
            vec![DiscoveredLink::new("https://example.com/partners", "Partners")]
        );

        let classification = classify(&harvest.links);
        assert_eq!(classification.bucket(Category::Partner), harvest.links.as_slice());
        assert_eq!(classification.total(), 1);
    }

    #[test]
    fn test_excluded_hrefs() {
        let base = base();
        assert_eq!(resolve_url(&base, "#"), None);
        assert_eq!(resolve_url(&base, "#pricing"), None);
        assert_eq!(resolve_url(&base, "javascript:void(0)"), None);
        assert_eq!(resolve_url(&base, "JavaScript:open()"), None);
        assert_eq!(resolve_url(&base, "mailto:sales@example.com"), None);
        assert_eq!(resolve_url(&base, "tel:+15555550100"), None);
        assert_eq!(resolve_url(&base, ""), None);
    }

    #[test]
    fn test_relative_and_absolute_resolution() {
        let base = Url::parse("https://www.example.com/products/").unwrap();
        assert_eq!(
            resolve_url(&base, "ai-dialer"),
            Some("https://www.example.com/products/ai-dialer".to_string())
        );
        assert_eq!(
            resolve_url(&base, "/pricing#plans"),
            Some("https://www.example.com/pricing".to_string())
        );
        assert_eq!(
            resolve_url(&base, "https://example.com/partners"),
            Some("https://example.com/partners".to_string())
        );
    }

    #[test]
    fn test_other_sites_are_dropped() {
        let base = base();
        assert_eq!(resolve_url(&base, "https://twitter.com/example"), None);
        assert_eq!(resolve_url(&base, "//cdn.other.net/app.js"), None);
    }

    #[test]
    fn test_same_site_compares_first_label_only() {
        let base = base();
        // Distinct registrable domains sharing a first label still match.
        assert!(resolve_url(&base, "https://example.io/about").is_some());
        // Subdomains have a different first label.
        assert_eq!(resolve_url(&base, "https://app.example.com/login"), None);
    }

    #[test]
    fn test_site_label() {
        assert_eq!(site_label("www.gong.io"), "gong");
        assert_eq!(site_label("gong.io"), "gong");
        assert_eq!(site_label("localhost"), "localhost");
    }

    #[test]
    fn test_long_text_is_body_copy() {
        let long_text = "word ".repeat(12);
        let html = format!(
            r#"<nav><a href="/blog/post">{}</a><a href="/customers">Customers</a></nav>"#,
            long_text
        );

        let harvest = harvest_nav_links(&html, "https://example.com").unwrap();

        assert_eq!(harvest.links.len(), 1);
        assert_eq!(harvest.links[0].text, "Customers");
    }

    #[test]
    fn test_duplicates_across_regions_collapse() {
        let html = r#"
            <header class="site-header">
                <nav class="main-nav">
                    <a href="/platform">  Platform
                    </a>
                </nav>
            </header>
            <div class="mega-menu"><a href="/platform">Platform</a></div>
        "#;

        let harvest = harvest_nav_links(html, "https://example.com").unwrap();

        assert_eq!(
            harvest.links,
            vec![DiscoveredLink::new("https://example.com/platform", "Platform")]
        );
    }

    #[test]
    fn test_links_outside_nav_are_ignored() {
        let html = r#"<main><a href="/partners">Partners</a></main>"#;
        let harvest = harvest_nav_links(html, "https://example.com").unwrap();
        assert!(harvest.links.is_empty());
    }

    #[test]
    fn test_query_outcomes() {
        let document = Html::parse_document("<nav><a href='/x'>X</a></nav>");

        assert!(matches!(query(&document, "nav a"), SelectorOutcome::Matched(ref els) if els.len() == 1));
        assert!(matches!(query(&document, "footer a"), SelectorOutcome::NoMatches));
        assert!(matches!(query(&document, "a[["), SelectorOutcome::Unsupported(_)));
    }

    #[test]
    fn test_unsupported_selector_does_not_abort_harvest() {
        let html = r#"<nav><a href="/partners">Partners</a></nav>"#;

        let harvest = harvest_with_selectors(
            html,
            "https://example.com",
            &["a:nonsense-pseudo", "nav a[href]"],
        )
        .unwrap();

        assert_eq!(harvest.links.len(), 1);
        assert_eq!(harvest.unsupported_selectors().count(), 1);
        assert_eq!(harvest.selectors[1].status, SelectorStatus::Matched(1));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = harvest_nav_links("<nav></nav>", "not a url").unwrap_err();
        assert!(matches!(err, ScanError::InvalidUrl(_)));
    }
}
