//! Echo request handler.

use bytes::Bytes;
use hyper::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::format;
use crate::protocols::http::{error_response, json_response};

/// Deepest array/object nesting accepted in a request body.
///
/// `serde_json` stops at 128 levels by default. Bodies are decoded with that
/// limit disabled, and this bound keeps decode, encode and drop recursion
/// within the main thread's stack.
pub const MAX_DEPTH: usize = 1000;

/// Decode `body` as JSON and build the echo response.
///
/// Valid JSON is re-serialized with a 200; anything else gets a 400 whose
/// `error` field describes the decode failure.
pub fn handle_body(body: &[u8]) -> Response<Bytes> {
    if nesting_depth(body) > MAX_DEPTH {
        debug!(len = body.len(), "Rejected body nested too deeply");
        return error_response(
            StatusCode::BAD_REQUEST,
            &format!("Invalid JSON: nesting depth exceeds {MAX_DEPTH}"),
        );
    }

    let value = match decode(body) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, len = body.len(), "Rejected body");
            return error_response(StatusCode::BAD_REQUEST, &format!("Invalid JSON: {e}"));
        }
    };

    match format::to_vec(&value) {
        Ok(encoded) => json_response(StatusCode::OK, encoded),
        Err(e) => {
            warn!(error = %e, "Failed to encode echo response");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn decode(body: &[u8]) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_slice(body);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de)?;
    de.end()?;
    Ok(value)
}

/// Maximum bracket depth of `body`, ignoring brackets inside strings.
///
/// Malformed input still yields a number; the decoder reports the real error.
fn nesting_depth(body: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in body {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}
