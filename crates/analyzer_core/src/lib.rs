//! analyzer-core: market data model, prompt builders, and the normalizer that
//! turns raw model text into an [`AnalysisResult`].
//!
//! Nothing here performs I/O. The server crate wires these pieces around a
//! single inference call:
//!
//! ```text
//! request body ──► prompt::build_* ──► (remote model) ──► normalize::normalize ──► response
//! ```

pub mod normalize;
pub mod prompt;
pub mod request;
pub mod schema;
pub mod types;

pub use normalize::{AnalysisResult, clean_model_output, normalize, normalize_with};
pub use prompt::{build_economic_prompt, build_report_prompt, build_structured_prompt};
pub use request::{EconomicAnalysisRequest, ReportAnalysisRequest, StructuredAnalysisRequest};
pub use schema::{SchemaPolicy, missing_sections};
pub use types::{EconomicData, EconomicIndicator, MarketEvent, PriceData, PriceSnapshot, Reading};
