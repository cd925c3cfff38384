// Tests for site list loading

use navscope_core::sites::{default_sites, load_sites_from_file, load_sites_from_source};
use navscope_scanner::Site;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_sites_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "# sales tools")?;
    writeln!(temp_file, "gong.io")?;
    writeln!(temp_file)?;
    writeln!(temp_file, "apollo.io, js")?;
    writeln!(temp_file, "https://www.outreach.io/")?;

    let sites = load_sites_from_file(temp_file.path())?;

    assert_eq!(
        sites,
        vec![
            Site::new("gong.io", false),
            Site::new("apollo.io", true),
            Site::new("https://www.outreach.io", false),
        ]
    );
    Ok(())
}

#[test]
fn test_load_sites_from_file_empty() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "# nothing here").unwrap();
    writeln!(temp_file, "   ").unwrap();

    let result = load_sites_from_file(temp_file.path());

    assert!(result.unwrap_err().contains("No valid sites"));
}

#[test]
fn test_load_sites_from_missing_file() {
    let result = load_sites_from_file(std::path::Path::new("/nonexistent/sites.txt"));
    assert!(result.unwrap_err().contains("Failed to read sites file"));
}

#[test]
fn test_load_sites_from_source_single_domain() {
    let sites = load_sites_from_source(Some("example.com"), true, None).unwrap();
    assert_eq!(sites, vec![Site::new("example.com", true)]);
}

#[test]
fn test_load_sites_from_source_defaults() {
    let sites = load_sites_from_source(None, false, None).unwrap();
    assert_eq!(sites, default_sites());
}

#[test]
fn test_sites_file_wins_over_domain() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "clari.com").unwrap();

    let sites = load_sites_from_source(Some("example.com"), false, Some(temp_file.path())).unwrap();

    assert_eq!(sites, vec![Site::new("clari.com", false)]);
}
