//! Static asset constants (CSS and JavaScript).

/// Stylesheet for the landing page.
pub const CSS: &str = include_str!("styles.css");

/// Form handling for the landing page.
pub const JS: &str = include_str!("scripts.js");
