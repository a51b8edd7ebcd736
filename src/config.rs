// src/config.rs

use clap::{Parser, ValueEnum};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 60;

/// Name of the environment variable holding the upstream credential.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Upstream completion API settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Bearer credential. `None` makes every analysis fail before any I/O.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub temperature: f64,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
        }
    }
}

impl AnalyzerConfig {
    /// Load from the process environment, reading a local `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_env_vars()
    }

    fn from_env_vars() -> Self {
        let mut config = Self {
            api_key: env::var(API_KEY_VAR).ok().filter(|key| !key.trim().is_empty()),
            ..Default::default()
        };

        if let Ok(url) = env::var("GROQ_API_URL") {
            config.api_url = url;
        }

        if let Ok(model) = env::var("GROQ_MODEL") {
            config.model = model;
        }

        if let Some(secs) = parse_secs("GROQ_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = Duration::from_secs(secs);
        }

        if let Some(secs) = parse_secs("GROQ_READ_TIMEOUT_SECS") {
            config.read_timeout = Duration::from_secs(secs);
        }

        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }
}

fn parse_secs(var: &str) -> Option<u64> {
    env::var(var).ok()?.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Listener and logging options for the server binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "lexis-analyze-server", version, about = "Contract analysis HTTP service")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn setup_clean_env() {
        env::remove_var(API_KEY_VAR);
        env::remove_var("GROQ_API_URL");
        env::remove_var("GROQ_MODEL");
        env::remove_var("GROQ_CONNECT_TIMEOUT_SECS");
        env::remove_var("GROQ_READ_TIMEOUT_SECS");
    }

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();

        assert_eq!(config.api_key, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.read_timeout, Duration::from_secs(60));
    }

    #[test]
    #[serial]
    fn test_from_env_missing_api_key() {
        setup_clean_env();

        let config = AnalyzerConfig::from_env_vars();
        assert!(config.api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_blank_api_key_treated_as_missing() {
        setup_clean_env();
        env::set_var(API_KEY_VAR, "   ");

        let config = AnalyzerConfig::from_env_vars();
        assert!(config.api_key.is_none());

        setup_clean_env();
    }

    #[test]
    #[serial]
    fn test_from_env_with_overrides() {
        setup_clean_env();
        env::set_var(API_KEY_VAR, "gsk-test");
        env::set_var("GROQ_API_URL", "http://localhost:9999/v1/chat/completions");
        env::set_var("GROQ_MODEL", "llama-3.1-8b-instant");
        env::set_var("GROQ_CONNECT_TIMEOUT_SECS", "3");
        env::set_var("GROQ_READ_TIMEOUT_SECS", "30");

        let config = AnalyzerConfig::from_env_vars();
        assert_eq!(config.api_key.as_deref(), Some("gsk-test"));
        assert_eq!(config.api_url, "http://localhost:9999/v1/chat/completions");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.read_timeout, Duration::from_secs(30));

        setup_clean_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeouts_fall_back_to_defaults() {
        setup_clean_env();
        env::set_var("GROQ_CONNECT_TIMEOUT_SECS", "soon");
        env::set_var("GROQ_READ_TIMEOUT_SECS", "0");

        let config = AnalyzerConfig::from_env_vars();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.read_timeout, Duration::from_secs(60));

        setup_clean_env();
    }

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        env::remove_var("PORT");
        env::remove_var("LOG_FORMAT");

        let config = ServerConfig::parse_from(["lexis-analyze-server"]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.verbose);
    }

    #[test]
    fn test_server_config_flags() {
        let config = ServerConfig::parse_from([
            "lexis-analyze-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--log-format",
            "json",
            "-v",
        ]);
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.verbose);
    }
}
