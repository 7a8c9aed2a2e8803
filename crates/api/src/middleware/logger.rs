//! Request/response logging with buffered bodies.
//!
//! Bodies are read fully, logged, and handed on unchanged. JSON `password`
//! values are masked in the log output only.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use common::AppError;

/// Largest request body the logger will buffer.
pub const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

const MASK: &str = "***";
const MASKED_FIELDS: [&str; 1] = ["password"];

/// Log every request and response with headers and bodies.
pub async fn logger_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4().to_string();
    let uri = request.uri().path().to_string();
    let method = request.method().to_string();

    info!(request_id = %request_id, "INIT URI : {}", uri);

    let (parts, body) = request.into_parts();
    let request_headers = render_headers(&parts.headers);
    let request_bytes = match to_bytes(body, MAX_REQUEST_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let reason = format!("failed to read request body: {}", e);
            log_request(&request_id, &uri, &method, &request_headers, &reason);
            return Err(AppError::bad_request(reason));
        }
    };
    let request_body = render_body(&request_bytes);

    let response = next
        .run(Request::from_parts(parts, Body::from(request_bytes)))
        .await;

    let (parts, body) = response.into_parts();
    let response_bytes = to_bytes(body, usize::MAX).await;

    log_request(&request_id, &uri, &method, &request_headers, &request_body);

    let response_bytes = response_bytes
        .map_err(|e| AppError::internal(format!("failed to read response body: {}", e)))?;

    info!(
        request_id = %request_id,
        status = parts.status.as_u16(),
        "<<<<< uri : {} , method : {} , header : {} , body : {}",
        uri,
        method,
        render_headers(&parts.headers),
        render_body(&response_bytes)
    );

    Ok(Response::from_parts(parts, Body::from(response_bytes)))
}

fn log_request(request_id: &str, uri: &str, method: &str, headers: &str, body: &str) {
    info!(
        request_id = %request_id,
        ">>>>> uri : {} , method : {} , header : {} , body : {}",
        uri, method, headers, body
    );
}

/// `[name: value] ` per header
fn render_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            format!(
                "[{}: {}] ",
                name,
                value.to_str().unwrap_or("<non-ascii>")
            )
        })
        .collect()
}

fn render_body(bytes: &Bytes) -> String {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(mut json) => {
            mask_sensitive(&mut json);
            json.to_string()
        }
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn mask_sensitive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if MASKED_FIELDS.contains(&key.as_str()) {
                    *field = Value::String(MASK.to_string());
                } else {
                    mask_sensitive(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(mask_sensitive),
        _ => {}
    }
}
