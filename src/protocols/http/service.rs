//! Request dispatch for the echo endpoint.

use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Body;
use hyper::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, SERVER};
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use std::convert::Infallible;
use tracing::{debug, trace};

use crate::protocols::echo::{self, format};

/// Largest request body accepted
pub const MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

const SERVER_NAME: &str = "json-echo/0.1.0";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Service function handed to hyper for every request
pub async fn handle_request<B>(req: Request<B>) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let mut response = dispatch(req).await;
    response
        .headers_mut()
        .insert(SERVER, HeaderValue::from_static(SERVER_NAME));

    debug!(
        status = response.status().as_u16(),
        len = response.body().len(),
        "Response"
    );

    Ok(response.map(Full::new))
}

async fn dispatch<B>(req: Request<B>) -> Response<Bytes>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    trace!(method = %req.method(), uri = %req.uri(), "Request");

    if req.method() != Method::POST {
        return error_response(
            StatusCode::NOT_IMPLEMENTED,
            &format!("Unsupported method ('{}')", req.method()),
        );
    }

    let declared = match content_length(req.headers()) {
        Ok(Some(len)) => len,
        Ok(None) => {
            return error_response(StatusCode::LENGTH_REQUIRED, "Content-Length required")
        }
        Err(message) => return error_response(StatusCode::BAD_REQUEST, &message),
    };

    if declared > MAX_BODY_SIZE {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            &format!("Request body exceeds {MAX_BODY_SIZE} bytes"),
        );
    }

    let body = match Limited::new(req.into_body(), MAX_BODY_SIZE).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            debug!(error = %e, expected = declared, "Failed to read request body");
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("Failed to read request body: {e}"),
            );
        }
    };

    echo::handle_body(&body)
}

fn content_length(headers: &HeaderMap) -> Result<Option<usize>, String> {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .map(Some)
        .ok_or_else(|| format!("Invalid Content-Length ({:?})", value))
}

/// `application/json` response with an already-serialized body
pub fn json_response(status: StatusCode, body: Vec<u8>) -> Response<Bytes> {
    let mut response = Response::new(Bytes::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// JSON error response: `{"error": "<message>"}`
pub fn error_response(status: StatusCode, message: &str) -> Response<Bytes> {
    let body = format::to_vec(&ErrorBody { error: message })
        .unwrap_or_else(|_| b"{\"error\": \"\"}".to_vec());
    json_response(status, body)
}
