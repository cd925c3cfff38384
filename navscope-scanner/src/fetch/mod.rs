//! Two-strategy page fetching.
//!
//! A static GET is tried first unless the site is known to need script
//! rendering. Pages that come back as loading shells are re-fetched through a
//! rendering service when one is configured. The order is driven by
//! [`next_step`] so the fallback sequence can be tested without any network.

pub mod http;
pub mod render;
pub mod shell;

pub use http::{HttpFetcher, StaticPage};
pub use render::RenderClient;
pub use shell::{is_js_loading_shell, visible_body_text};

use crate::error::{Result, ScanError};
use crate::result::{FetchResult, Site, Strategy};
use std::future::Future;
use tracing::{debug, info, warn};

/// Source of raw server-sent HTML.
pub trait StaticSource {
    fn fetch_static(&self, url: &str) -> impl Future<Output = Result<StaticPage>> + Send;
}

/// Source of script-rendered HTML.
pub trait RenderSource {
    fn fetch_rendered(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// How far the fallback sequence has progressed for one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    NotTried,
    StaticTried,
    RenderTried,
    FallbackTried,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStep {
    /// Direct fetch; accepted only when the page is not a shell.
    Static,
    /// Rendering-service fetch.
    Render,
    /// Direct fetch accepted as-is, shell or not.
    StaticFallback,
    GiveUp,
}

impl FetchStep {
    /// Stage reached once this step has been attempted without success.
    pub fn stage_after(self) -> FetchStage {
        match self {
            FetchStep::Static => FetchStage::StaticTried,
            FetchStep::Render => FetchStage::RenderTried,
            FetchStep::StaticFallback => FetchStage::FallbackTried,
            FetchStep::GiveUp => FetchStage::Exhausted,
        }
    }
}

/// Decide the next fetch attempt.
pub fn next_step(stage: FetchStage, expects_rendering: bool, render_available: bool) -> FetchStep {
    match stage {
        FetchStage::NotTried if !expects_rendering => FetchStep::Static,
        FetchStage::NotTried | FetchStage::StaticTried if render_available => FetchStep::Render,
        FetchStage::NotTried | FetchStage::StaticTried | FetchStage::RenderTried
            if expects_rendering =>
        {
            FetchStep::StaticFallback
        }
        _ => FetchStep::GiveUp,
    }
}

/// Static-then-rendered fetcher. `R` is only consulted when a render source
/// was configured.
pub struct SmartFetcher<S, R> {
    static_source: S,
    render_source: Option<R>,
}

impl<S: StaticSource, R: RenderSource> SmartFetcher<S, R> {
    pub fn new(static_source: S, render_source: Option<R>) -> Self {
        Self {
            static_source,
            render_source,
        }
    }

    pub fn render_available(&self) -> bool {
        self.render_source.is_some()
    }

    pub async fn fetch(&self, site: &Site) -> Result<FetchResult> {
        let url = site.url();
        let mut stage = FetchStage::NotTried;
        let mut attempts: Vec<String> = Vec::new();

        loop {
            let step = next_step(
                stage,
                site.expects_script_rendering,
                self.render_available(),
            );
            debug!("{}: {:?} -> {:?}", site.domain, stage, step);

            match step {
                FetchStep::Static => match self.static_source.fetch_static(&url).await {
                    Ok(page) => {
                        if !is_js_loading_shell(&page.body) {
                            info!("{}: static content accepted", site.domain);
                            return Ok(FetchResult {
                                html: page.body,
                                strategy: Strategy::Static,
                                is_shell: false,
                                final_url: page.url,
                            });
                        }
                        debug!("{}: static content is a loading shell", site.domain);
                        attempts.push("static: content was a loading shell".to_string());
                    }
                    Err(e) => {
                        warn!("{}: static fetch failed: {}", site.domain, e);
                        attempts.push(format!("static: {}", e));
                    }
                },
                FetchStep::Render => {
                    if let Some(render) = &self.render_source {
                        match render.fetch_rendered(&url).await {
                            Ok(html) => {
                                info!("{}: rendered content accepted", site.domain);
                                let is_shell = is_js_loading_shell(&html);
                                return Ok(FetchResult {
                                    html,
                                    strategy: Strategy::Rendered,
                                    is_shell,
                                    final_url: url,
                                });
                            }
                            Err(e) => {
                                warn!("{}: rendering failed: {}", site.domain, e);
                                attempts.push(format!("rendered: {}", e));
                            }
                        }
                    }
                }
                FetchStep::StaticFallback => match self.static_source.fetch_static(&url).await {
                    Ok(page) => {
                        let is_shell = is_js_loading_shell(&page.body);
                        info!(
                            "{}: falling back to static content (shell: {})",
                            site.domain, is_shell
                        );
                        return Ok(FetchResult {
                            html: page.body,
                            strategy: Strategy::Static,
                            is_shell,
                            final_url: page.url,
                        });
                    }
                    Err(e) => {
                        warn!("{}: static fallback failed: {}", site.domain, e);
                        attempts.push(format!("static fallback: {}", e));
                    }
                },
                FetchStep::GiveUp => {
                    if !self.render_available() {
                        attempts.push("rendered: no rendering service configured".to_string());
                    }
                    return Err(ScanError::AllStrategiesExhausted {
                        domain: site.domain.clone(),
                        attempts,
                    });
                }
            }

            stage = step.stage_after();
        }
    }
}
