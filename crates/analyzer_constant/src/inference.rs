//! Remote inference endpoint defaults

/// GitHub Models inference endpoint (OpenAI-compatible chat completions)
pub const DEFAULT_ENDPOINT: &str = "https://models.github.ai/inference";
/// Model identifier sent with every request
pub const DEFAULT_MODEL: &str = "deepseek/DeepSeek-R1-0528";
/// Per-call deadline when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Credential env vars, checked in order
pub const API_KEY_ENVS: &[&str] = &["AZURE_AI_KEY", "GITHUB_AI_TOKEN"];
