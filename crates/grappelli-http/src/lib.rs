//! # Grappelli HTTP
//!
//! HTTP primitives for the Grappelli framework: the [`Request`] and
//! [`Response`] types every other crate works with, plus the pieces of
//! request anatomy the dispatch layer needs — query/form parameter maps,
//! `multipart/form-data` parsing, and uploaded-file persistence.
//!
//! ## Modules
//!
//! - [`request`]: Request type, builder, and parameter parsing
//! - [`response`]: Response type with builder-style constructors
//! - [`multipart`]: multipart/form-data body parsing
//! - [`upload`]: uploaded files and the timestamp-named upload store
//!
//! ## Example
//!
//! ```
//! use grappelli_http::{Request, Response};
//! use hyper::Method;
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/greet?name=jay")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(request.parameter_map().get("name"), Some(&"jay".to_string()));
//!
//! let response = Response::ok().with_body("hello");
//! assert_eq!(response.status, hyper::StatusCode::OK);
//! ```

pub mod error;
pub mod multipart;
pub mod request;
pub mod response;
pub mod upload;

pub use error::{Error, Result};
pub use multipart::MultipartForm;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use upload::{UploadStore, UploadedFile, validate_safe_filename};
