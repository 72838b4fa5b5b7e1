//! Binding module.
//!
//! Converts raw request text (path variables, query/form parameters,
//! multipart parts, the body) into the typed arguments a handler
//! declared.
//!
//! # Examples
//!
//! ```rust
//! use grappelli::binding::{BindContext, FromParam};
//!
//! let ctx = BindContext::new();
//! let age = f64::from_param("20", &ctx).unwrap();
//! assert_eq!(age, 20.0);
//! ```

pub use grappelli_binding::*;
