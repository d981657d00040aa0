//! Headless browser renderer for script-rendered catalog pages.
//!
//! Uses chromiumoxide (CDP). One browser is launched (or connected to) per
//! run; every navigation opens its own tab, which is closed afterwards.

mod config;

pub use config::{default_headless, default_timeout, BrowserEngineConfig};

#[cfg(feature = "browser")]
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(feature = "browser")]
use tokio::sync::Mutex;
#[cfg(feature = "browser")]
use tokio::task::JoinHandle;
#[cfg(feature = "browser")]
use tracing::{debug, info, warn};

#[cfg(feature = "browser")]
use chromiumoxide::{Browser, BrowserConfig, Handler};
#[cfg(feature = "browser")]
use futures::StreamExt;

use super::PageRenderer;
use crate::error::RenderError;

/// Browser-backed renderer holding one Chromium session.
#[cfg(feature = "browser")]
pub struct BrowserRenderer {
    config: BrowserEngineConfig,
    settle: Duration,
    browser: Mutex<Browser>,
    handler: JoinHandle<()>,
    /// True when we launched the process and therefore own its shutdown.
    owned: bool,
}

#[cfg(feature = "browser")]
impl BrowserRenderer {
    /// Common Chrome executable paths to check.
    const CHROME_PATHS: &'static [&'static str] = &[
        // Linux
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
        // macOS
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        // Common install locations
        "/opt/google/chrome/google-chrome",
    ];

    /// Launch a local browser, or connect to `remote_url` when configured.
    ///
    /// `settle` is slept after every navigation so late scripts can finish.
    pub async fn launch(config: BrowserEngineConfig, settle: Duration) -> Result<Self, RenderError> {
        let (browser, handler, owned) = match config.remote_url.clone() {
            Some(remote_url) => {
                let (browser, handler) = Self::connect_remote(&config, &remote_url).await?;
                (browser, handler, false)
            }
            None => {
                let (browser, handler) = Self::launch_local(&config).await?;
                (browser, handler, true)
            }
        };

        Ok(Self {
            config,
            settle,
            browser: Mutex::new(browser),
            handler: spawn_handler(handler),
            owned,
        })
    }

    /// Find Chrome executable.
    fn find_chrome() -> Result<PathBuf, RenderError> {
        for path in Self::CHROME_PATHS {
            let p = std::path::Path::new(path);
            if p.exists() {
                info!("Found Chrome at: {}", path);
                return Ok(p.to_path_buf());
            }
        }

        // Check if in PATH via `which`
        for cmd in &[
            "google-chrome",
            "google-chrome-stable",
            "chromium",
            "chromium-browser",
        ] {
            if let Ok(output) = std::process::Command::new("which").arg(cmd).output() {
                if output.status.success() {
                    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    if !path.is_empty() {
                        info!("Found Chrome in PATH: {}", path);
                        return Ok(PathBuf::from(path));
                    }
                }
            }
        }

        Err(launch_error(
            "Chrome/Chromium not found. Install chromium or set BROWSER_URL to a running instance",
        ))
    }

    async fn launch_local(config: &BrowserEngineConfig) -> Result<(Browser, Handler), RenderError> {
        info!("Launching browser (headless={})", config.headless);

        let chrome_path = Self::find_chrome()?;
        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .request_timeout(Duration::from_secs(config.timeout));

        // Set headless mode (with_head means NOT headless)
        if !config.headless {
            builder = builder.with_head();
        }

        if let Some(ref proxy) = config.proxy {
            builder = builder.arg(format!("--proxy-server={}", proxy));
        }

        builder = builder
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox") // Often needed for headless in containers
            .arg("--disable-gpu");

        for arg in &config.chrome_args {
            builder = builder.arg(arg);
        }

        let browser_config = builder
            .build()
            .map_err(|e| launch_error(format!("Failed to build browser config: {}", e)))?;

        Browser::launch(browser_config)
            .await
            .map_err(|e| launch_error(format!("Failed to launch browser: {}", e)))
    }

    /// Connect to a remote Chrome instance.
    async fn connect_remote(
        config: &BrowserEngineConfig,
        url: &str,
    ) -> Result<(Browser, Handler), RenderError> {
        info!(
            "Connecting to remote browser at {} (timeout: {}s)",
            url, config.timeout
        );

        // Get WebSocket URL from the /json/version endpoint
        let http_url = url
            .replace("ws://", "http://")
            .replace("wss://", "https://");
        let version_url = format!("{}/json/version", http_url.trim_end_matches('/'));

        let resp: serde_json::Value = reqwest::Client::new()
            .get(&version_url)
            .send()
            .await
            .map_err(|e| launch_error(format!("Failed to connect to remote browser: {}", e)))?
            .json()
            .await
            .map_err(|e| launch_error(format!("Failed to parse browser version info: {}", e)))?;

        let ws_url = resp
            .get("webSocketDebuggerUrl")
            .and_then(|v| v.as_str())
            .ok_or_else(|| launch_error("No webSocketDebuggerUrl in response"))?;

        info!("Connecting to WebSocket: {}", ws_url);

        Browser::connect(ws_url)
            .await
            .map_err(|e| launch_error(format!("Failed to connect to remote browser: {}", e)))
    }

    /// Navigate a fresh tab to `url` and read back its content.
    async fn load(&self, url: &str) -> Result<String, chromiumoxide::error::CdpError> {
        let page = {
            let browser = self.browser.lock().await;
            browser.new_page(url).await?
        };

        let content = async {
            page.wait_for_navigation().await?;
            tokio::time::sleep(self.settle).await;

            if let Some(ref selector) = self.config.wait_for_selector {
                debug!("Waiting for selector: {}", selector);
                if let Err(e) = page.find_element(selector.as_str()).await {
                    warn!("Selector {} not found on {}: {}", selector, url, e);
                }
            }

            page.content().await
        }
        .await;

        // Close the tab to prevent accumulation
        if let Err(e) = page.close().await {
            debug!("Failed to close tab for {}: {}", url, e);
        }

        content
    }

    /// End the session. Shuts the browser down when it was launched locally.
    pub async fn close(self) {
        let mut browser = self.browser.into_inner();
        if self.owned {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser: {}", e);
            }
            if let Err(e) = browser.wait().await {
                debug!("Browser process did not exit cleanly: {}", e);
            }
        }
        self.handler.abort();
        info!("Browser session closed");
    }
}

#[cfg(feature = "browser")]
#[async_trait]
impl PageRenderer for BrowserRenderer {
    async fn render(&self, url: &str) -> Result<String, RenderError> {
        info!("Navigating to {}", url);
        let timeout = Duration::from_secs(self.config.timeout);
        match tokio::time::timeout(timeout, self.load(url)).await {
            Ok(Ok(content)) => Ok(content),
            Ok(Err(e)) => Err(RenderError::Browser {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(RenderError::Timeout {
                url: url.to_string(),
                secs: self.config.timeout,
            }),
        }
    }
}

/// Drive the CDP event loop until the connection drops.
#[cfg(feature = "browser")]
fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    })
}

#[cfg(feature = "browser")]
fn launch_error(message: impl Into<String>) -> RenderError {
    RenderError::Browser {
        url: String::new(),
        message: message.into(),
    }
}

// Stub for when browser feature is disabled
#[cfg(not(feature = "browser"))]
pub struct BrowserRenderer {
    _config: BrowserEngineConfig,
}

#[cfg(not(feature = "browser"))]
impl BrowserRenderer {
    pub async fn launch(_config: BrowserEngineConfig, _settle: Duration) -> Result<Self, RenderError> {
        Err(RenderError::Unsupported)
    }

    pub async fn close(self) {}
}

#[cfg(not(feature = "browser"))]
#[async_trait]
impl PageRenderer for BrowserRenderer {
    async fn render(&self, _url: &str) -> Result<String, RenderError> {
        Err(RenderError::Unsupported)
    }
}
