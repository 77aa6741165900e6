//! OpenAI-compatible inference provider (GitHub Models / Azure AI inference)

mod convert;
mod provider;
mod types;

pub use provider::InferenceProvider;
pub use types::InferenceConfig;
