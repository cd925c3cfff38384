// Site lists: the built-in test set and newline-delimited site files

use navscope_scanner::Site;
use std::fs;
use std::path::Path;
use tracing::warn;
use url::Url;

/// Built-in sites audited when no list is given. The flag records whether the
/// homepage is known to be a client-rendered shell.
pub static DEFAULT_SITES: &[(&str, bool)] = &[
    ("gong.io", false),
    ("outreach.io", false),
    ("salesloft.com", false),
    ("clari.com", false),
    ("apollo.io", true),
    ("lavender.ai", true),
];

pub fn default_sites() -> Vec<Site> {
    DEFAULT_SITES
        .iter()
        .map(|(domain, expects_js)| Site::new(*domain, *expects_js))
        .collect()
}

/// Parse `domain[,js]` (comma or whitespace separated). Blank lines and `#`
/// comments yield `None`, as do entries that don't form a valid URL.
pub fn parse_site_line(line: &str) -> Option<Site> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let domain = parts.next()?.trim_end_matches('/');
    let expects_js = parts
        .next()
        .map(|flag| matches!(flag.to_lowercase().as_str(), "js" | "render" | "true" | "yes"))
        .unwrap_or(false);

    let site = Site::new(domain, expects_js);
    match Url::parse(&site.url()) {
        Ok(url) if url.host_str().is_some() => Some(site),
        _ => {
            warn!("Skipping invalid site '{}'", line);
            None
        }
    }
}

pub fn load_sites_from_file(path: &Path) -> Result<Vec<Site>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read sites file {}: {}", path.display(), e))?;

    let sites: Vec<Site> = content.lines().filter_map(parse_site_line).collect();

    if sites.is_empty() {
        return Err(format!("No valid sites found in {}", path.display()));
    }

    Ok(sites)
}

/// A sites file wins over a single domain; with neither, the built-in list.
pub fn load_sites_from_source(
    domain: Option<&str>,
    expects_js: bool,
    sites_file: Option<&Path>,
) -> Result<Vec<Site>, String> {
    if let Some(path) = sites_file {
        load_sites_from_file(path)
    } else if let Some(domain) = domain {
        parse_site_line(domain)
            .map(|site| vec![Site::new(site.domain, expects_js)])
            .ok_or_else(|| format!("Invalid site: {}", domain))
    } else {
        Ok(default_sites())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sites_are_valid() {
        let sites = default_sites();
        assert_eq!(sites.len(), DEFAULT_SITES.len());
        for site in sites {
            assert!(parse_site_line(&site.domain).is_some());
        }
    }

    #[test]
    fn test_parse_site_line_flags() {
        assert_eq!(
            parse_site_line("example.com, js"),
            Some(Site::new("example.com", true))
        );
        assert_eq!(
            parse_site_line("example.com render"),
            Some(Site::new("example.com", true))
        );
        assert_eq!(
            parse_site_line("example.com/"),
            Some(Site::new("example.com", false))
        );
    }

    #[test]
    fn test_parse_site_line_skips_comments() {
        assert_eq!(parse_site_line("# competitors"), None);
        assert_eq!(parse_site_line("   "), None);
    }

    #[test]
    fn test_parse_site_line_invalid_host() {
        assert_eq!(parse_site_line("%%%"), None);
    }
}
