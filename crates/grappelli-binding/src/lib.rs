//! # Grappelli Binding
//!
//! Typed parameter binding: converts raw request data (path variables,
//! query/form parameters, multipart files, the raw body) into the typed
//! arguments a handler declares.
//!
//! Conversion is explicit and registry-driven. Scalar types implement
//! [`FromParam`]; structs bindable field-by-field implement [`BindRecord`];
//! both register in a [`ConverterRegistry`] keyed by type identity. The
//! [`Binder`] walks a handler's [`ParamSpec`] list in order and either
//! produces a complete [`BoundArguments`] or fails with the first
//! [`BindError`] — never a partial set.
//!
//! ## Modules
//!
//! - [`convert`]: scalar conversion and the converter registry
//! - [`record`]: field-by-field record binding
//! - [`spec`]: parameter declarations
//! - [`args`]: the bound-argument container handlers read from
//! - [`binder`]: the binder and its per-request input
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use bytes::Bytes;
//! use grappelli_binding::{BindInput, Binder, ConverterRegistry, ParamSpec};
//!
//! let binder = Binder::new(Arc::new(ConverterRegistry::with_defaults()));
//!
//! let path_vars = HashMap::from([("id".to_string(), "42".to_string())]);
//! let params = HashMap::from([("name".to_string(), "jay".to_string())]);
//! let body = Bytes::new();
//! let input = BindInput {
//!     path_vars: &path_vars,
//!     params: &params,
//!     files: None,
//!     body: &body,
//! };
//!
//! let args = binder
//!     .bind(&input, &[ParamSpec::path::<i64>("id"), ParamSpec::param::<String>("name")])
//!     .unwrap();
//!
//! assert_eq!(args.get::<i64>("id").unwrap(), &42);
//! assert_eq!(args.get::<String>("name").unwrap(), "jay");
//! ```

pub mod args;
pub mod binder;
pub mod convert;
pub mod error;
pub mod record;
pub mod spec;

pub use args::{BoundArguments, BoundValue};
pub use binder::{BindInput, Binder};
pub use convert::{BindContext, ConvertError, ConverterRegistry, FromParam, DEFAULT_DATE_FORMAT};
pub use error::{BindError, BindErrorKind, Result};
pub use record::{field, BindRecord};
pub use spec::{ParamSource, ParamSpec};
