//! Server module.
//!
//! HTTP/1.1 transport: binds a listener and feeds requests into a
//! [`Dispatcher`](crate::Dispatcher).

pub use grappelli_server::*;
