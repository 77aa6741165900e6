//! Application metadata constants

pub const DISPLAY_NAME: &str = "AI Crypto Analyzer";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen port
pub const DEFAULT_PORT: u16 = 3001;
/// Default bind address
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Origins allowed by the structured variant when `ALLOWED_ORIGINS` is unset
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5174",
    "https://aicryptoanalyzer.netlify.app",
];

/// Literal reported by `GET /health`
pub const HEALTH_STATUS: &str = "OK";
