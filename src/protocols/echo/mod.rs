//! JSON echo protocol.
//!
//! A local stand-in for a remote echo endpoint, so client tests do not
//! depend on a third-party service:
//! - Client sends: `POST` with a JSON body
//! - Server echoes: `200` with the same JSON value re-serialized
//!
//! ## Protocol Format
//!
//! ```text
//! Request:  {"a":1,"b":[true,null]}
//! Response: 200 {"a": 1, "b": [true, null]}
//!
//! Request:  not json
//! Response: 400 {"error": "Invalid JSON: expected ident at line 1 column 2"}
//! ```
//!
//! The echoed text is semantically equal to the input, not byte-identical:
//! whitespace is normalized by [`format::EchoFormatter`]. Key order and
//! number spelling are kept.

pub mod format;
pub mod handler;

pub use handler::handle_body;
