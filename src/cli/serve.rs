//! Web server command.

use console::style;

use crate::config::Settings;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let (host, port) = match bind {
        Some(bind) => parse_bind_address(bind, &settings.host, settings.port),
        None => (settings.host.clone(), settings.port),
    };

    println!(
        "{} Starting playreviews server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!(
        "  Fetching up to {} reviews per lookup ({}/{})",
        settings.max_count, settings.language, settings.country
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "8080" -> default_host:8080
/// - Just a host: "127.0.0.1" -> 127.0.0.1:default_port
/// - Host and port: "127.0.0.1:8080"
fn parse_bind_address(bind: &str, default_host: &str, default_port: u16) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return (default_host.to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), default_port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_only() {
        assert_eq!(
            parse_bind_address("8080", "0.0.0.0", 5000),
            ("0.0.0.0".to_string(), 8080)
        );
    }

    #[test]
    fn test_parse_host_only() {
        assert_eq!(
            parse_bind_address("127.0.0.1", "0.0.0.0", 5000),
            ("127.0.0.1".to_string(), 5000)
        );
    }

    #[test]
    fn test_parse_host_and_port() {
        assert_eq!(
            parse_bind_address("localhost:9000", "0.0.0.0", 5000),
            ("localhost".to_string(), 9000)
        );
    }
}
