//! Protocol implementations.
//!
//! - `http`: hyper service deciding the status for each request
//! - `echo`: JSON echo handler served over `http`

pub mod echo;
pub mod http;
