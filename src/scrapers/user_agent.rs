//! User agent selection for Play Store requests.

/// Desktop Chrome agent. The batchexecute endpoint serves the web client's
/// payload shape only to browser agents.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Resolve the configured user agent. A missing or blank value falls back to
/// [`USER_AGENT`]; anything else is sent as-is.
pub fn resolve_user_agent(config: Option<&str>) -> &str {
    match config.map(str::trim) {
        None | Some("") => USER_AGENT,
        Some(custom) => custom,
    }
}
