//! HTTP module.
//!
//! Request/response primitives, multipart parsing, and upload storage.
//!
//! # Examples
//!
//! ```rust
//! use grappelli::http::{Request, Response};
//! use hyper::Method;
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/mvc/hello?name=jay")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(request.path(), "/mvc/hello");
//! let _response = Response::ok().with_body("hello");
//! ```

pub use grappelli_http::*;
