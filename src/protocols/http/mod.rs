//! HTTP/1 service.
//!
//! Framing, `Expect: 100-continue`, `Date` and `Content-Length` are left
//! to hyper. This module decides what each request gets back:
//!
//! ```text
//! POST with Content-Length  -> echo handler (200 or 400)
//! POST without it           -> 411
//! POST over MAX_BODY_SIZE   -> 413
//! any other method          -> 501
//! ```

pub mod service;

pub use service::{error_response, handle_request, json_response};
