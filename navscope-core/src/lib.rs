pub mod audit;
pub mod config;
pub mod report;
pub mod sites;

use colored::Colorize;
use std::io::{self, Write};

pub use audit::{AuditOptions, AuditProgressCallback, SiteReport, audit_site, execute_audit};
pub use config::RenderConfig;
pub use report::{AuditSummary, ReportFormat};

const BANNER: &str = r#"
 _ __   __ ___   _____  ___ ___  _ __   ___
| '_ \ / _` \ \ / / __|/ __/ _ \| '_ \ / _ \
| | | | (_| |\ V /\__ \ (_| (_) | |_) |  __/
|_| |_|\__,_| \_/ |___/\___\___/| .__/ \___|
                                |_|
"#;

/// Stdout is reserved for reports, so the banner goes to stderr.
pub fn print_banner() {
    let _ = write_banner(&mut std::io::stderr().lock());
}

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", BANNER.bright_cyan().bold())?;
    writeln!(
        out,
        "  {} {}\n",
        "navigation link discovery".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    )
}
