use std::time::Duration;

use analyzer_constant::app::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_BIND, DEFAULT_PORT};
use analyzer_constant::inference::{API_KEY_ENVS, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use analyzer_core::SchemaPolicy;
use clap::ValueEnum;
use thiserror::Error;

use crate::cli::Cli;

/// Which backend flavour the process serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// `POST /analyze` with `{ events, priceData }`, free-text report, open CORS
    Report,
    /// `POST /analyze` with JSON-schema output, `POST /analyze-economic`, origin allow-list
    #[default]
    Structured,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Report => "report",
            Variant::Structured => "structured",
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "report" | "price" | "v1" => Ok(Variant::Report),
            "structured" | "json" | "v2" => Ok(Variant::Structured),
            other => Err(format!("unknown variant: {other}")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing inference credential: set one of {}", API_KEY_ENVS.join(", "))]
    MissingCredential,

    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Server configuration derived from environment variables.
///
/// The credential is checked here, at startup, for every variant.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    /// Deadline for each remote inference call
    pub timeout: Duration,
    /// Origins allowed by the structured variant
    pub allowed_origins: Vec<String>,
    pub variant: Variant,
    pub schema_policy: SchemaPolicy,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("allowed_origins", &self.allowed_origins)
            .field("variant", &self.variant)
            .field("schema_policy", &self.schema_policy)
            .finish()
    }
}

fn lookup_str<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn lookup_parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup_str(lookup, name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: name,
            message: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = API_KEY_ENVS
            .iter()
            .find_map(|name| lookup_str(&lookup, name))
            .ok_or(ConfigError::MissingCredential)?;

        let allowed_origins = lookup_str(&lookup, "ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect());

        let timeout_secs = lookup_parsed(&lookup, "INFERENCE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "INFERENCE_TIMEOUT_SECS",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            bind: lookup_str(&lookup, "BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port: lookup_parsed(&lookup, "PORT", DEFAULT_PORT)?,
            api_key,
            endpoint: lookup_str(&lookup, "INFERENCE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: lookup_str(&lookup, "INFERENCE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            allowed_origins,
            variant: lookup_parsed(&lookup, "ANALYZER_VARIANT", Variant::default())?,
            schema_policy: lookup_parsed(&lookup, "ANALYZER_SCHEMA_POLICY", SchemaPolicy::default())?,
        })
    }

    /// Command-line flags win over the environment.
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(bind) = &cli.bind {
            self.bind = bind.clone();
        }
        if let Some(variant) = cli.variant {
            self.variant = variant;
        }
        if let Some(model) = &cli.model {
            self.model = model.clone();
        }
        self
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
