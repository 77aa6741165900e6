//! Conversion between unified types and chat-completions wire types

use serde_json::Value;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::types::{GenerateRequest, GenerateResponse};

/// Convert unified request to wire request
pub fn to_chat_request(req: &GenerateRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: req.model.clone(),
        messages: req
            .messages
            .iter()
            .map(|m| ChatMessage {
                role: m.role.as_str().to_string(),
                content: Some(m.content.clone()),
            })
            .collect(),
        max_tokens: req.options.max_tokens,
        temperature: req.options.temperature,
    }
}

/// Convert wire response to unified response. Missing choices or content
/// yield empty text.
pub fn from_chat_response(resp: ChatCompletionResponse) -> GenerateResponse {
    let first = resp.choices.into_iter().next();
    let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
    let content = first.and_then(|c| c.message.content).unwrap_or_default();

    GenerateResponse {
        id: resp.id,
        model: resp.model,
        content,
        finish_reason,
        usage: resp.usage,
    }
}

/// Extract the error payload from a non-success body.
///
/// Returns the `error` member when the body is a JSON envelope, the whole
/// JSON body otherwise, and the raw text as a JSON string when it is not JSON.
pub fn api_error_payload(body: &str) -> Value {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut obj)) => match obj.remove("error") {
            Some(err) => err,
            None => Value::Object(obj),
        },
        Ok(other) => other,
        Err(_) => Value::String(body.to_string()),
    }
}
