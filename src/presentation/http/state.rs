// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

/// Shared by every handler through `Extension`.
#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    /// Origins allowed by the CORS layer. Empty means same-origin only.
    pub allowed_origins: Vec<String>,
}

impl HttpState {
    pub fn new(services: Arc<ApplicationServices>, allowed_origins: &[String]) -> Self {
        Self {
            services,
            allowed_origins: normalise_origins(allowed_origins),
        }
    }
}

// Browsers send `Origin` without a trailing slash.
fn normalise_origins(origins: &[String]) -> Vec<String> {
    origins
        .iter()
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
