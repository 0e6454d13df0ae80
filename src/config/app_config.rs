use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::infrastructure::observability::{LoggingConfig, ObservabilityConfig};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Which transport the process serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Http,
    Grpc,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Http => write!(f, "http"),
            Transport::Grpc => write!(f, "grpc"),
        }
    }
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Transport::Http),
            "grpc" => Ok(Transport::Grpc),
            _ => Err(format!("server type '{}' not supported", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_grpc_port")]
    pub grpc_port: u16,
    #[serde(default)]
    pub transport: Transport,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_grpc_port() -> u16 {
    50051
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            grpc_port: default_grpc_port(),
            transport: Transport::default(),
        }
    }
}

impl AppConfig {
    /// Loads `config/default`, `config/local` and `APP__*` variables, then
    /// applies the `SERVER_TYPE` override
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.with_server_type(std::env::var("SERVER_TYPE").ok().as_deref())
    }

    /// Overrides the transport. `None` or an empty value keeps the
    /// configured one, an unknown value is an error.
    pub fn with_server_type(mut self, server_type: Option<&str>) -> Result<Self, config::ConfigError> {
        if let Some(value) = server_type.filter(|v| !v.is_empty()) {
            self.server.transport = value.parse().map_err(config::ConfigError::Message)?;
        }
        Ok(self)
    }
}
