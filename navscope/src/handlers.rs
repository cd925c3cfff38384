use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use navscope_core::report::{generate_report, save_report};
use navscope_core::sites::load_sites_from_source;
use navscope_core::{AuditOptions, AuditProgressCallback, RenderConfig, ReportFormat, execute_audit};
use navscope_scanner::fetch::shell::{MIN_VISIBLE_TEXT_CHARS, has_spa_marker};
use navscope_scanner::fetch::{is_js_loading_shell, visible_body_text};
use navscope_scanner::harvest::SelectorStatus;
use navscope_scanner::{
    Classification, Harvest, HttpFetcher, RenderClient, ScanError, SmartFetcher, classify,
    harvest_nav_links,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, debug, info};

/// Logs go to stderr so they never interleave with a report on stdout.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Rendering config from the environment, unless rendering is switched off.
pub fn render_config_for(no_render: bool, wait_ms: u64) -> Option<RenderConfig> {
    if no_render {
        return None;
    }
    RenderConfig::from_env().map(|config| config.with_wait_ms(wait_ms))
}

pub fn build_smart_fetcher(
    timeout_secs: u64,
    render: Option<&RenderConfig>,
) -> Result<SmartFetcher<HttpFetcher, RenderClient>, ScanError> {
    let http = HttpFetcher::with_timeout(timeout_secs)?;
    let renderer = render.map(RenderConfig::client).transpose()?;
    Ok(SmartFetcher::new(http, renderer))
}

/// Expand `~` in a user-supplied output path.
pub fn expand_output_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

pub fn load_html_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Offline harvest + classify of an already-downloaded page.
pub fn classify_html(html: &str, base_url: &str) -> Result<(Harvest, Classification), ScanError> {
    let harvest = harvest_nav_links(html, base_url)?;
    let classification = classify(&harvest.links);
    Ok((harvest, classification))
}

pub fn format_classification(harvest: &Harvest, classification: &Classification) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "SELECTORS".bright_blue().bold()));
    for report in &harvest.selectors {
        let status = match &report.status {
            SelectorStatus::Matched(n) => format!("{} match(es)", n).green().to_string(),
            SelectorStatus::NoMatches => "no matches".dimmed().to_string(),
            SelectorStatus::Unsupported(reason) => {
                format!("unsupported: {}", reason).yellow().to_string()
            }
        };
        out.push_str(&format!("  {:<32} {}\n", report.selector, status));
    }

    out.push_str(&format!(
        "\n{} {} unique nav link(s)\n\n",
        "→".blue(),
        harvest.links.len()
    ));

    for bucket in &classification.buckets {
        out.push_str(&format!(
            "{} ({})\n",
            bucket.category.label().bold(),
            bucket.links.len()
        ));
        for link in &bucket.links {
            let text = if link.text.is_empty() {
                "(no text)"
            } else {
                link.text.as_str()
            };
            out.push_str(&format!("  • {}  {}\n", text, link.url.dimmed()));
        }
    }

    out
}

pub fn format_shell_check(html: &str) -> String {
    let visible_chars = visible_body_text(html).chars().count();
    let marker = has_spa_marker(html);
    let verdict = if is_js_loading_shell(html) {
        "loading shell".yellow().bold()
    } else {
        "real content".green().bold()
    };

    format!(
        "Visible text:  {} chars (threshold {})\nSPA marker:    {}\nVerdict:       {}\n",
        visible_chars,
        MIN_VISIBLE_TEXT_CHARS,
        if marker { "yes" } else { "no" },
        verdict
    )
}

fn print_divider() {
    eprintln!("{}", "═".repeat(60).bright_blue().bold());
}

pub async fn handle_audit(sub_matches: &ArgMatches, quiet: bool, verbose: bool) {
    if let Err(e) = run_audit(sub_matches, quiet, verbose).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_audit(sub_matches: &ArgMatches, quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let domain = sub_matches.get_one::<String>("url");
    let expects_js = sub_matches.get_flag("js");
    let sites_file = sub_matches.get_one::<PathBuf>("sites-file");
    let no_render = sub_matches.get_flag("no-render");
    let wait_ms = *sub_matches.get_one::<u64>("wait").unwrap_or(&3000);
    let timeout_secs = *sub_matches.get_one::<u64>("timeout").unwrap_or(&10);
    let format: ReportFormat = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let output = sub_matches
        .get_one::<String>("output")
        .map(|p| expand_output_path(p));

    let sites = load_sites_from_source(
        domain.map(String::as_str),
        expects_js,
        sites_file.map(PathBuf::as_path),
    )
    .map_err(anyhow::Error::msg)?;

    let render = render_config_for(no_render, wait_ms);
    let fetcher = build_smart_fetcher(timeout_secs, render.as_ref())
        .context("Failed to build HTTP client")?;

    if !quiet {
        print_divider();
        eprintln!("{}", "  NAVSCOPE AUDIT".bright_white().bold());
        print_divider();
        eprintln!("{} Sites: {}", "→".blue(), sites.len());
        let render_state = match (&render, no_render) {
            (_, true) => "disabled (--no-render)".to_string(),
            (Some(config), false) => format!("{} (wait {} ms)", config.endpoint, config.wait_ms),
            (None, false) => format!("not configured (set {})", navscope_core::config::API_KEY_ENV),
        };
        eprintln!("{} Rendering: {}", "→".blue(), render_state);
        eprintln!("{} Timeout: {}s\n", "→".blue(), timeout_secs);
    }
    info!("Auditing {} site(s)", sites.len());

    let options = AuditOptions {
        sites,
        show_progress: !quiet,
    };

    let progress_callback: Option<AuditProgressCallback> = if verbose {
        Some(Arc::new(|msg: String| eprintln!("{}", msg)))
    } else {
        None
    };

    let reports = execute_audit(&fetcher, options, progress_callback).await;

    // Files get plain text, the terminal gets colour.
    if output.is_some() {
        colored::control::set_override(false);
    }
    let report = generate_report(&reports, format).context("Failed to serialise report")?;

    match output {
        Some(path) => {
            save_report(&report, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            colored::control::unset_override();
            debug!("Wrote {} bytes to {}", report.len(), path.display());
            if !quiet {
                eprintln!("{} Report saved to {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}

pub fn handle_classify(sub_matches: &ArgMatches) {
    let result = (|| -> anyhow::Result<String> {
        let file = sub_matches
            .get_one::<PathBuf>("FILE")
            .context("missing FILE")?;
        let base_url = sub_matches
            .get_one::<String>("base-url")
            .context("missing --base-url")?;

        let html = load_html_file(file)?;
        let (harvest, classification) = classify_html(&html, base_url)?;
        Ok(format_classification(&harvest, &classification))
    })();

    match result {
        Ok(out) => print!("{}", out),
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

pub fn handle_shell_check(sub_matches: &ArgMatches) {
    let result = sub_matches
        .get_one::<PathBuf>("FILE")
        .context("missing FILE")
        .and_then(|file| load_html_file(file));

    match result {
        Ok(html) => print!("{}", format_shell_check(&html)),
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}
