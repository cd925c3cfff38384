// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    build_smart_fetcher, classify_html, expand_output_path, format_classification,
    format_shell_check, render_config_for,
};

// Re-export audit functionality from navscope-core
pub use navscope_core::{AuditOptions, AuditProgressCallback, SiteReport, execute_audit};
