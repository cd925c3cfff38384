use indicatif::{ProgressBar, ProgressStyle};
use navscope_scanner::fetch::{RenderSource, StaticSource};
use navscope_scanner::harvest::SelectorReport;
use navscope_scanner::{
    Classification, FetchResult, ScanError, Site, SmartFetcher, Strategy, classify,
    harvest_nav_links,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Options for configuring an audit run
pub struct AuditOptions {
    pub sites: Vec<Site>,
    pub show_progress: bool,
}

/// Callback for reporting audit progress
pub type AuditProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Outcome of auditing one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteReport {
    pub site: Site,
    pub success: bool,
    pub strategy: Option<Strategy>,
    /// The content that was classified still looked like a loading shell.
    pub is_shell: bool,
    pub final_url: Option<String>,
    pub html_bytes: usize,
    /// Unique nav links harvested before classification.
    pub links_found: usize,
    pub classification: Classification,
    pub selector_failures: Vec<SelectorReport>,
    pub error: Option<String>,
    pub elapsed: Duration,
}

impl SiteReport {
    pub fn failed(site: Site, error: String, elapsed: Duration) -> Self {
        Self {
            site,
            success: false,
            strategy: None,
            is_shell: false,
            final_url: None,
            html_bytes: 0,
            links_found: 0,
            classification: Classification::empty(),
            selector_failures: Vec::new(),
            error: Some(error),
            elapsed,
        }
    }
}

/// Harvest and classify already-fetched content.
pub fn analyze_page(site: &Site, fetched: FetchResult) -> Result<SiteReport, ScanError> {
    let harvest = harvest_nav_links(&fetched.html, &fetched.final_url)?;
    let classification = classify(&harvest.links);
    let selector_failures = harvest.unsupported_selectors().cloned().collect();

    Ok(SiteReport {
        site: site.clone(),
        success: true,
        strategy: Some(fetched.strategy),
        is_shell: fetched.is_shell,
        final_url: Some(fetched.final_url),
        html_bytes: fetched.html.len(),
        links_found: harvest.links.len(),
        classification,
        selector_failures,
        error: None,
        elapsed: Duration::ZERO,
    })
}

/// Fetch, harvest and classify one site. Failures are folded into the report.
pub async fn audit_site<S, R>(fetcher: &SmartFetcher<S, R>, site: &Site) -> SiteReport
where
    S: StaticSource,
    R: RenderSource,
{
    let start = Instant::now();

    let outcome = match fetcher.fetch(site).await {
        Ok(fetched) => analyze_page(site, fetched),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(mut report) => {
            report.elapsed = start.elapsed();
            info!(
                "{}: {} links classified into {} bucket entries",
                site.domain,
                report.links_found,
                report.classification.total()
            );
            report
        }
        Err(e) => {
            warn!("{}: audit failed: {}", site.domain, e);
            SiteReport::failed(site.clone(), e.to_string(), start.elapsed())
        }
    }
}

/// Audit each site in turn. Sites run one at a time so targets aren't
/// rate-limited and output stays readable. One site failing never stops the
/// rest.
pub async fn execute_audit<S, R>(
    fetcher: &SmartFetcher<S, R>,
    options: AuditOptions,
    progress_callback: Option<AuditProgressCallback>,
) -> Vec<SiteReport>
where
    S: StaticSource,
    R: RenderSource,
{
    let AuditOptions {
        sites,
        show_progress,
    } = options;

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting audit...");
        Some(pb)
    } else {
        None
    };

    let mut reports = Vec::with_capacity(sites.len());
    for (idx, site) in sites.iter().enumerate() {
        let message = format!("Auditing {}/{}: {}", idx + 1, sites.len(), site.domain);
        if let Some(ref pb) = progress_bar {
            pb.set_message(message.clone());
        }
        if let Some(ref callback) = progress_callback {
            callback(message);
        }

        let report = audit_site(fetcher, site).await;

        if !report.success
            && let Some(ref callback) = progress_callback
        {
            callback(format!(
                "[!] {} failed: {}",
                site.domain,
                report.error.as_deref().unwrap_or("unknown error")
            ));
        }
        reports.push(report);
    }

    if let Some(ref pb) = progress_bar {
        let succeeded = reports.iter().filter(|r| r.success).count();
        pb.finish_with_message(format!(
            "Audit complete! {}/{} sites succeeded",
            succeeded,
            reports.len()
        ));
    }

    reports
}
