//! analyzer_llms: chat-completion gateway for the crypto analyzer.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          Arc<dyn Provider> (AppState)         │
//! │                      │                        │
//! │                      ▼                        │
//! │  ┌────────────────────────────────────────┐  │
//! │  │ InferenceProvider                      │  │
//! │  │  POST {base_url}/chat/completions      │  │
//! │  │  deadline + CancellationToken          │  │
//! │  └────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use analyzer_llms::{GenerateRequest, InferenceConfig, InferenceProvider, Provider};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> analyzer_llms::Result<()> {
//! let provider = InferenceProvider::new(InferenceConfig::new("github-token"))?;
//! let request = GenerateRequest::user_prompt(provider.model(), "Summarize BTC today")
//!     .with_max_tokens(512);
//! let response = provider.generate(request, &CancellationToken::new()).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;


// Re-export core abstractions
pub use error::{Error, Result};
pub use provider::Provider;

// Re-export provider implementations
pub use providers::InferenceProvider;
pub use providers::inference::InferenceConfig;

// Re-export commonly used types
pub use types::{GenerateOptions, GenerateRequest, GenerateResponse, Headers, Message, Role, Usage};
