//! # Grappelli URLs
//!
//! Route registration and resolution for the Grappelli framework.
//!
//! A [`RouteTable`] maps `(method, path pattern)` pairs to handler
//! payloads. Patterns are literal paths with optional `{name}` variable
//! segments; resolution extracts the variable values from the request
//! path. Method-specific routes win over [`RouteMethod::Any`] wildcards,
//! and registering the same shape twice fails up front with
//! [`RouteError::Duplicate`].
//!
//! ## Modules
//!
//! - [`pattern`]: path pattern parsing and matching
//! - [`route`]: a single registered route and its method constraint
//! - [`table`]: the route table — registration and resolution
//!
//! ## Example
//!
//! ```
//! use grappelli_urls::{RouteMethod, RouteTable};
//! use hyper::Method;
//!
//! let mut table = RouteTable::new();
//! table.register(RouteMethod::Get, "/user/{id}", "get-user").unwrap();
//!
//! let found = table.resolve(&Method::GET, "/user/42").unwrap();
//! assert_eq!(found.handler, "get-user");
//! assert_eq!(found.path_vars.get("id"), Some(&"42".to_string()));
//! ```

pub mod error;
pub mod pattern;
pub mod route;
pub mod table;

pub use error::RouteError;
pub use pattern::PathPattern;
pub use route::{Route, RouteMethod};
pub use table::{RouteMatch, RouteTable};
