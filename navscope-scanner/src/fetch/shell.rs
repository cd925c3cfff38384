// Loading-shell detection for client-rendered pages

use scraper::{Html, Selector};

/// Below this many characters of visible body text a page counts as a shell.
pub const MIN_VISIBLE_TEXT_CHARS: usize = 200;

/// Lowercase substrings that only appear in pages waiting on client script.
pub static SPA_MARKERS: &[&str] = &[
    r#"<div id="root"></div>"#,
    r#"<div id="app"></div>"#,
    r#"<div id="__next"></div>"#,
    r#"<div id="___gatsby"></div>"#,
    "you need to enable javascript",
    "please enable javascript",
    "enable javascript to run this app",
    "javascript is required",
];

const EXCLUDED_TAGS: &[&str] = &["script", "style", "link"];

/// True when the document looks like an empty shell that still needs script
/// execution to show real content.
pub fn is_js_loading_shell(html: &str) -> bool {
    if has_spa_marker(html) {
        return true;
    }
    visible_body_text(html).chars().count() < MIN_VISIBLE_TEXT_CHARS
}

pub fn has_spa_marker(html: &str) -> bool {
    let lowered = html.to_lowercase();
    SPA_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Text inside `<body>`, skipping script/style/link content, whitespace collapsed.
pub fn visible_body_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };

    let mut raw = String::new();
    for body in document.select(&body_selector) {
        for node in body.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let excluded = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| EXCLUDED_TAGS.contains(&el.name()))
            });
            if !excluded {
                raw.push_str(text);
                raw.push(' ');
            }
        }
    }

    collapse_whitespace(&raw)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
