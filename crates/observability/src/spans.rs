//! Span helpers for HTTP handlers and inference calls

/// Create a span with common HTTP request fields
///
/// # Example
///
/// ```rust
/// use analyzer_observability::http_request_span;
///
/// let span = http_request_span!("POST", "/analyze");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! http_request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "http.request",
            http.method = $method,
            http.route = $path,
            http.status_code = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
            inference.duration_ms = tracing::field::Empty,
        )
    };
}

/// Create a span around one call to the remote model
///
/// # Example
///
/// ```rust
/// use analyzer_observability::inference_span;
///
/// let span = inference_span!("deepseek/DeepSeek-R1-0528", "structured");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! inference_span {
    ($model:expr, $purpose:expr) => {
        tracing::info_span!(
            "inference.call",
            inference.model = $model,
            inference.purpose = $purpose,
        )
    };
}

/// Record an error on the current span and log it
pub fn record_error<E: std::fmt::Display + ?Sized>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record latency/duration on the current span
///
/// ```rust
/// use analyzer_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// record_duration("inference.duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
