// Report generation from audit results

use crate::audit::SiteReport;
use colored::Colorize;
use navscope_scanner::{Category, Strategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("Unknown report format: {}", other)),
        }
    }
}

/// Aggregate counts over every audited site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub sites_audited: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub shells_served: usize,
    pub static_count: usize,
    pub rendered_count: usize,
    pub links_found: usize,
    pub category_totals: BTreeMap<Category, usize>,
}

impl AuditSummary {
    pub fn from_reports(reports: &[SiteReport]) -> Self {
        let mut summary = AuditSummary {
            sites_audited: reports.len(),
            category_totals: Category::ALL.iter().map(|&c| (c, 0)).collect(),
            ..Default::default()
        };

        for report in reports {
            if !report.success {
                summary.failed += 1;
                continue;
            }
            summary.succeeded += 1;
            summary.links_found += report.links_found;
            if report.is_shell {
                summary.shells_served += 1;
            }
            match report.strategy {
                Some(Strategy::Static) => summary.static_count += 1,
                Some(Strategy::Rendered) => summary.rendered_count += 1,
                None => {}
            }
            for bucket in &report.classification.buckets {
                *summary.category_totals.entry(bucket.category).or_insert(0) += bucket.links.len();
            }
        }

        summary
    }
}

pub fn generate_text_report(reports: &[SiteReport]) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push('\n');
    report.push_str("                        NAVSCOPE NAVIGATION AUDIT\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    for site_report in reports {
        report.push_str(&format_site_section(site_report));
        report.push('\n');
    }

    let summary = AuditSummary::from_reports(reports);

    report.push_str(RULE);
    report.push('\n');
    report.push_str("SUMMARY\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    report.push_str(&format!("Sites audited:   {}\n", summary.sites_audited));
    report.push_str(&format!("Succeeded:       {}\n", summary.succeeded));
    report.push_str(&format!("Failed:          {}\n", summary.failed));
    report.push_str(&format!("Shells served:   {}\n", summary.shells_served));
    report.push_str(&format!("Static fetches:  {}\n", summary.static_count));
    report.push_str(&format!("Rendered:        {}\n", summary.rendered_count));
    report.push_str(&format!("Nav links:       {}\n", summary.links_found));
    report.push_str("\nLinks per category:\n");
    for (category, count) in &summary.category_totals {
        report.push_str(&format!("  {:<24}{}\n", category.label(), count));
    }
    report.push('\n');

    report
}

fn format_site_section(site_report: &SiteReport) -> String {
    let mut section = String::new();
    let domain = &site_report.site.domain;

    if !site_report.success {
        section.push_str(&format!("{} {}\n", "✗".red().bold(), domain.bold()));
        section.push_str(&format!(
            "  Error:        {}\n",
            site_report.error.as_deref().unwrap_or("unknown error")
        ));
        section.push_str(&format!(
            "  Elapsed:      {} ms\n",
            site_report.elapsed.as_millis()
        ));
        return section;
    }

    let strategy = site_report
        .strategy
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    section.push_str(&format!(
        "{} {}  [{}]\n",
        "✓".green().bold(),
        domain.bold(),
        strategy.cyan()
    ));
    if site_report.is_shell {
        section.push_str(&format!(
            "  {}\n",
            "⚠ content still looks like a loading shell".yellow()
        ));
    }
    if let Some(ref final_url) = site_report.final_url {
        section.push_str(&format!("  Final URL:    {}\n", final_url));
    }
    section.push_str(&format!("  HTML size:    {} bytes\n", site_report.html_bytes));
    section.push_str(&format!("  Nav links:    {}\n", site_report.links_found));
    section.push_str(&format!(
        "  Elapsed:      {} ms\n",
        site_report.elapsed.as_millis()
    ));

    for bucket in &site_report.classification.buckets {
        section.push_str(&format!(
            "  {} ({})\n",
            bucket.category.label(),
            bucket.links.len()
        ));
        for link in &bucket.links {
            let text = if link.text.is_empty() {
                "(no text)"
            } else {
                link.text.as_str()
            };
            section.push_str(&format!("    • {}  {}\n", text, link.url.dimmed()));
        }
    }

    for failure in &site_report.selector_failures {
        section.push_str(&format!(
            "  {} unsupported selector: {}\n",
            "⚠".yellow(),
            failure.selector
        ));
    }

    section
}

pub fn generate_json_report(reports: &[SiteReport]) -> Result<String, serde_json::Error> {
    let summary = AuditSummary::from_reports(reports);

    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "navscope",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": summary,
            "sites": reports
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_report(
    reports: &[SiteReport],
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(reports)),
        ReportFormat::Json => generate_json_report(reports),
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
