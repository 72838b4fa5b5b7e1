//! HTTP transport for grappelli.
//!
//! Binds a TCP listener, parses HTTP/1.1 with hyper, and feeds every
//! request into a shared [`Dispatcher`](grappelli_dispatch::Dispatcher).
//!
//! ```rust,ignore
//! use grappelli_server::serve;
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//!
//! let addr: SocketAddr = "127.0.0.1:8000".parse()?;
//! serve(addr, Arc::new(dispatcher)).await?;
//! ```

pub mod http;

pub use http::{HttpServer, serve};
