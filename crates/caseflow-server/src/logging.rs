use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;
use std::fmt::Write;
use std::time::Instant;

/// Newtype wrapper for trace IDs stored in request extensions.
///
/// Using a dedicated type instead of bare `String` prevents conflicts
/// with other extensions.
#[derive(Clone)]
pub struct TraceId(pub String);

impl std::ops::Deref for TraceId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

/// Generate a 16-character hex trace ID (8 random bytes).
fn generate_trace_id() -> String {
    let bytes: [u8; 8] = rand::thread_rng().gen();
    let mut s = String::with_capacity(16);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Format elapsed time as a human-readable string.
fn format_elapsed(elapsed_us: u128) -> String {
    if elapsed_us < 1000 {
        format!("{elapsed_us}µs")
    } else if elapsed_us < 1_000_000 {
        format!("{:.1}ms", elapsed_us as f64 / 1000.0)
    } else {
        format!("{:.2}s", elapsed_us as f64 / 1_000_000.0)
    }
}

/// Middleware attaching a trace id to every request and logging the
/// outcome with timing.
pub async fn request_logging(mut request: Request, next: Next) -> Response {
    let trace_id = TraceId(generate_trace_id());
    request.extensions_mut().insert(trace_id.clone());

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        trace_id = %trace_id.0,
        %method,
        path,
        status = response.status().as_u16(),
        elapsed = %format_elapsed(start.elapsed().as_micros()),
        "request"
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_ids_are_hex_and_distinct() {
        let a = generate_trace_id();
        let b = generate_trace_id();
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn elapsed_formatting_picks_sane_units() {
        assert_eq!(format_elapsed(250), "250µs");
        assert_eq!(format_elapsed(2500), "2.5ms");
        assert_eq!(format_elapsed(2_500_000), "2.50s");
    }
}
