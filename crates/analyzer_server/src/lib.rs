//! analyzer-server: HTTP surface of the crypto analyzer.
//!
//! ```text
//! caller ──► /analyze ──► prompt builder ──► Provider::generate ──► normalizer ──► caller
//! ```
//!
//! Routes depend on the configured [`Variant`](config::Variant):
//!
//! | route                    | report | structured |
//! |--------------------------|--------|------------|
//! | `POST /analyze`          | text   | JSON       |
//! | `POST /analyze-economic` | –      | text       |
//! | `GET /health`            | yes    | yes        |

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use app::build_app;
pub use config::{ConfigError, ServerConfig, Variant};
pub use error::ApiError;
pub use state::AppState;
