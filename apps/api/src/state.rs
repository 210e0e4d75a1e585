use std::sync::Arc;

use crate::config::Config;
use crate::resume::parser::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Shared parser; its vocabulary loads on first use.
    pub parser: Arc<ResumeParser>,
}
