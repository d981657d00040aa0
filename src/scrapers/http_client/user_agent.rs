//! User agent handling for HTTP requests.

pub const USER_AGENT: &str = "catalog-harvest/0.3 (product catalog research)";

/// Browser user agent for impersonate mode.
const IMPERSONATE_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Resolve user agent from config value.
/// - None => default harvest user agent
/// - "impersonate" => real browser user agent
/// - other => custom user agent string
pub fn resolve_user_agent(config: Option<&str>) -> String {
    match config {
        None => USER_AGENT.to_string(),
        Some("impersonate") => IMPERSONATE_USER_AGENT.to_string(),
        Some(custom) => custom.to_string(),
    }
}
