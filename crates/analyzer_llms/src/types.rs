//! Provider-neutral request/response types

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One chat message
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Extra HTTP headers, kept ordered so requests are reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    inner: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Copy every header from `other`, overwriting duplicates.
    pub fn merge_with(&mut self, other: &Headers) {
        for (k, v) in &other.inner {
            self.inner.insert(k.clone(), v.clone());
        }
    }

    /// Convert to a reqwest header map. Names or values that are not valid
    /// HTTP are skipped.
    pub fn to_reqwest_headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in &self.inner {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                map.insert(name, value);
            }
        }
        map
    }
}

/// Sampling and transport options for a single call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    /// Overrides the provider's default deadline
    pub deadline: Option<Duration>,
    pub headers: Option<Headers>,
}

/// A chat-completion request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: GenerateOptions::default(),
        }
    }

    /// A request carrying exactly one user message.
    pub fn user_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(model, vec![Message::user(prompt)])
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.options.temperature = temperature;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.options.deadline = Some(deadline);
        self
    }
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A completed chat response reduced to what callers use
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    /// Text of the first choice, empty when the provider sent none
    pub content: String,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_builder() {
        let req = GenerateRequest::user_prompt("m", "hi")
            .with_max_tokens(512)
            .with_temperature(Some(0.6))
            .with_deadline(Duration::from_secs(5));
        assert_eq!(req.messages, vec![Message::user("hi")]);
        assert_eq!(req.options.max_tokens, Some(512));
        assert_eq!(req.options.temperature, Some(0.6));
        assert_eq!(req.options.deadline, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_headers_merge_and_convert() {
        let mut base = Headers::new();
        base.insert("Authorization", "Bearer a");
        let mut custom = Headers::new();
        custom.insert("Authorization", "Bearer b");
        custom.insert("bad header", "x");
        base.merge_with(&custom);
        assert_eq!(base.get("Authorization"), Some("Bearer b"));

        let map = base.to_reqwest_headers();
        assert_eq!(map.get("authorization").unwrap(), "Bearer b");
        assert_eq!(map.len(), 1);
    }
}
