use page_loader_scanner::fetch::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Options for configuring a page load
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Per-request timeout; the connect timeout is half of it
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Show one spinner per asset download
    pub show_progress_bars: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            show_progress_bars: false,
        }
    }
}
