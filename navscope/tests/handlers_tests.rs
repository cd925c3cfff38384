use navscope::handlers::*;
use navscope_core::RenderConfig;
use navscope_scanner::Category;
use std::io::Write;
use tempfile::NamedTempFile;

const NAV_PAGE: &str = r#"<html><body>
<header>
  <nav>
    <a href="/customers/case-studies">Case Studies</a>
    <a href="/partners">Partners</a>
    <a href="/pricing">Pricing</a>
    <a href="mailto:sales@example.com">Email us</a>
  </nav>
</header>
<main><p>Welcome</p></main>
</body></html>"#;

#[test]
fn test_expand_output_path_plain() {
    assert_eq!(
        expand_output_path("reports/audit.json"),
        std::path::PathBuf::from("reports/audit.json")
    );
}

#[test]
fn test_expand_output_path_tilde() {
    if std::env::var("HOME").is_err() {
        return;
    }
    let expanded = expand_output_path("~/audit.txt");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.ends_with("audit.txt"));
}

#[test]
fn test_classify_html_buckets_nav_links() {
    let (harvest, classification) = classify_html(NAV_PAGE, "https://example.com/").unwrap();

    assert_eq!(harvest.links.len(), 3);
    assert_eq!(
        classification.bucket(Category::Customer)[0].url,
        "https://example.com/customers/case-studies"
    );
    assert_eq!(classification.count(Category::Partner), 1);
    assert_eq!(classification.count(Category::Product), 1);
}

#[test]
fn test_classify_html_rejects_bad_base_url() {
    assert!(classify_html(NAV_PAGE, "not a url").is_err());
}

#[test]
fn test_format_classification_lists_every_category() {
    colored::control::set_override(false);
    let (harvest, classification) = classify_html(NAV_PAGE, "https://example.com/").unwrap();

    let out = format_classification(&harvest, &classification);

    for category in Category::ALL {
        assert!(out.contains(category.label()), "missing {}", category);
    }
    assert!(out.contains("nav a[href]"));
    assert!(out.contains("3 unique nav link(s)"));
    assert!(out.contains("Partners  https://example.com/partners"));
}

#[test]
fn test_format_shell_check_verdicts() {
    colored::control::set_override(false);

    let shell = r#"<html><body><div id="root"></div><script>boot()</script></body></html>"#;
    let out = format_shell_check(shell);
    assert!(out.contains("SPA marker:    yes"));
    assert!(out.contains("loading shell"));

    let article = format!("<html><body><p>{}</p></body></html>", "navigation ".repeat(40));
    let out = format_shell_check(&article);
    assert!(out.contains("SPA marker:    no"));
    assert!(out.contains("real content"));
}

#[test]
fn test_load_html_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    write!(temp_file, "{}", NAV_PAGE)?;

    let html = load_html_file(temp_file.path())?;
    assert_eq!(html, NAV_PAGE);

    Ok(())
}

#[test]
fn test_load_html_file_missing() {
    let err = load_html_file(std::path::Path::new("/nonexistent/page.html")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_render_config_disabled_by_flag() {
    assert_eq!(render_config_for(true, 5000), None);
}

#[test]
fn test_build_smart_fetcher_render_availability() {
    let fetcher = build_smart_fetcher(5, None).unwrap();
    assert!(!fetcher.render_available());

    let config = RenderConfig::new("test-key").with_wait_ms(1000);
    let fetcher = build_smart_fetcher(5, Some(&config)).unwrap();
    assert!(fetcher.render_available());
}
