//! Analyzer observability - tracing setup shared by the analyzer binaries
//!
//! Console logging through `tracing-subscriber`, plus optional OTLP span
//! export when an endpoint is configured.
//!
//! # Quick Start
//!
//! ```no_run
//! use analyzer_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("crypto-analyzer")
//!     .with_log_level("info");
//! init(config)?;
//!
//! tracing::info!("Service started");
//! # Ok::<(), analyzer_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod spans;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, shutdown};
pub use spans::{record_duration, record_error};
