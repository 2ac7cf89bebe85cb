//! Command-line configuration.
//!
//! The host launches the plugin without arguments, so every flag has a
//! usable default.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use digitalocean::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "doit-provider-tag",
    version,
    about = "Tag provider plugin for doit, served as JSON-RPC over stdin/stdout"
)]
pub struct CliConfig {
    /// Root URL of the provider API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_url: Url,

    /// Deadline for each provider request, in seconds.
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Format of the diagnostic log written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl CliConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        CliConfig::command().debug_assert();
    }

    #[test]
    fn no_flags_yields_defaults() {
        let config = CliConfig::try_parse_from(["doit-provider-tag"]).unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT.as_secs());
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.client_config().timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn flags_override_defaults() {
        let config = CliConfig::try_parse_from([
            "doit-provider-tag",
            "--api-url",
            "http://127.0.0.1:8080/",
            "--timeout-secs",
            "3",
            "--log-format",
            "json",
        ])
        .unwrap();
        let client = config.client_config();
        assert_eq!(client.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(client.timeout, Duration::from_secs(3));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(CliConfig::try_parse_from(["doit-provider-tag", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(CliConfig::try_parse_from(["doit-provider-tag", "--api-url", "not a url"]).is_err());
    }
}
