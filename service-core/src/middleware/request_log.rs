use axum::http::HeaderValue;
use axum::{extract::Request, http::header, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MISSING_ORIGIN: &str = "n/a";

/// Emits one access-log event per request and propagates `x-request-id`.
///
/// The request id is taken from the inbound header or generated, written
/// back onto the request (so span builders further in can read it) and
/// echoed on the response.
pub async fn request_log_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    let method = req.method().clone();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|h| h.to_str().ok())
        .unwrap_or(MISSING_ORIGIN)
        .to_string();

    let mut response = next.run(req).await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms,
        origin = %origin,
        "{} {} {} - {}ms - origin={}",
        method,
        path,
        response.status().as_u16(),
        elapsed_ms,
        origin,
    );

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}
