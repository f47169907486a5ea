//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently the
//! request identifier and request/response logging.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
