use clap::{Args, Parser, ValueEnum};
use ipnetwork::IpNetwork;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub rate_limit: RateLimitConfig,

    #[command(flatten)]
    pub contact: ContactConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "CONTACT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CONTACT_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management server (liveness probe)
    #[arg(long, env = "CONTACT_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight requests during shutdown
    #[arg(long, env = "CONTACT_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,

    /// Comma-separated list of CIDRs to trust for X-Forwarded-For IP extraction
    #[arg(
        long,
        env = "CONTACT_TRUSTED_PROXIES",
        default_value = "10.0.0.0/8,172.16.0.0/12,192.168.0.0/16,127.0.0.1/32",
        value_delimiter = ','
    )]
    pub trusted_proxies: Vec<IpNetwork>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            mgmt_port: 9090,
            shutdown_timeout_secs: 5,
            trusted_proxies: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct RateLimitConfig {
    /// Form submissions per second allowed per client IP
    #[arg(long, env = "CONTACT_RATE_LIMIT_PER_SECOND", default_value_t = 1)]
    pub per_second: u32,

    /// Burst allowance for form submissions
    #[arg(long, env = "CONTACT_RATE_LIMIT_BURST", default_value_t = 5)]
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { per_second: 1, burst: 5 }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ContactConfig {
    /// Path the contact form posts to
    #[arg(long, env = "CONTACT_ROUTE", default_value = "/api/contact")]
    pub route: String,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "CONTACT_MAX_BODY_BYTES", default_value_t = 65_536)]
    pub max_body_bytes: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self { route: "/api/contact".to_string(), max_body_bytes: 65_536 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TelemetryConfig {
    /// OTLP collector endpoint; telemetry export is disabled when unset
    #[arg(long, env = "CONTACT_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "CONTACT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_args() {
        let config = Config::try_parse_from(["site-contact"]).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.trusted_proxies.len(), 4);
        assert_eq!(config.contact.route, "/api/contact");
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
        assert!(config.telemetry.otlp_endpoint.is_none());
    }

    #[test]
    fn test_overrides_from_args() {
        let config = Config::try_parse_from([
            "site-contact",
            "--port",
            "8080",
            "--burst",
            "10",
            "--log-format",
            "json",
            "--trusted-proxies",
            "127.0.0.1/32,::1/128",
        ])
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.rate_limit.burst, 10);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
        assert_eq!(config.server.trusted_proxies.len(), 2);
    }

    #[test]
    fn test_rejects_bad_proxy_cidr() {
        let result = Config::try_parse_from(["site-contact", "--trusted-proxies", "not-a-cidr"]);
        assert!(result.is_err());
    }
}
