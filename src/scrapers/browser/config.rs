//! Browser engine configuration types.

use serde::{Deserialize, Serialize};

/// Headless browser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserEngineConfig {
    /// Render pages in Chromium. When false, pages are fetched over plain HTTP.
    pub enabled: bool,

    /// Run in headless mode (default: true).
    /// Set to false for debugging selectors against a visible window.
    pub headless: bool,

    /// Proxy server URL (e.g., "socks5://127.0.0.1:1080").
    pub proxy: Option<String>,

    /// Page load timeout in seconds.
    pub timeout: u64,

    /// Wait for this CSS selector before reading the page content.
    pub wait_for_selector: Option<String>,

    /// Additional Chrome arguments.
    pub chrome_args: Vec<String>,

    /// Remote Chrome DevTools URL (e.g., "ws://localhost:9222").
    /// If set, connects to existing browser instead of launching one.
    pub remote_url: Option<String>,
}

impl Default for BrowserEngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            headless: default_headless(),
            proxy: None,
            timeout: default_timeout(),
            wait_for_selector: None,
            chrome_args: Vec::new(),
            remote_url: None,
        }
    }
}

pub fn default_headless() -> bool {
    true
}

pub fn default_timeout() -> u64 {
    30
}

impl BrowserEngineConfig {
    /// Apply overrides read through `var`.
    ///
    /// - `BROWSER_URL` - remote DevTools endpoint
    /// - `BROWSER_HEADLESS` - "false"/"0" to show the window
    pub(crate) fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = var("BROWSER_URL").filter(|u| !u.is_empty()) {
            self.remote_url = Some(url);
        }
        if let Some(val) = var("BROWSER_HEADLESS") {
            self.headless = !(val.eq_ignore_ascii_case("false") || val == "0");
        }
        self
    }
}
