//! URLs module.
//!
//! The route table: explicit (method, pattern) registrations with
//! `{name}` path variables, resolved per request.

pub use grappelli_urls::*;
