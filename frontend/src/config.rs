//! Settings compiled into the client.

use common::dashboard::DashboardConfig;
use common::mirror::MirrorEndpoint;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix of every service call. Empty means same origin.
    pub api_base: String,
    pub mirror: MirrorEndpoint,
    pub dashboard: DashboardConfig,
    pub dashboard_refresh_ms: u32,
    pub carousel_ms: u32,
    /// How long the feedback thank-you screen stays up before going home.
    pub feedback_redirect_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            mirror: MirrorEndpoint::default(),
            dashboard: DashboardConfig::default(),
            dashboard_refresh_ms: 120_000,
            carousel_ms: 10_000,
            feedback_redirect_ms: 5_000,
        }
    }
}
