use hyper::Method;
use std::fmt;

use crate::{PathPattern, RouteError};

/// The method component of a route registration.
///
/// `Any` is the wildcard: it matches GET, POST, PUT and DELETE, but
/// method-specific registrations on the same pattern always win over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
	Get,
	Post,
	Put,
	Delete,
	Any,
}

impl RouteMethod {
	/// Whether this registration accepts the given request method.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_urls::RouteMethod;
	/// use hyper::Method;
	///
	/// assert!(RouteMethod::Get.matches(&Method::GET));
	/// assert!(!RouteMethod::Get.matches(&Method::POST));
	/// assert!(RouteMethod::Any.matches(&Method::DELETE));
	/// assert!(!RouteMethod::Any.matches(&Method::PATCH));
	/// ```
	pub fn matches(&self, method: &Method) -> bool {
		match self {
			RouteMethod::Get => *method == Method::GET,
			RouteMethod::Post => *method == Method::POST,
			RouteMethod::Put => *method == Method::PUT,
			RouteMethod::Delete => *method == Method::DELETE,
			RouteMethod::Any => matches!(
				*method,
				Method::GET | Method::POST | Method::PUT | Method::DELETE
			),
		}
	}

	pub fn is_any(&self) -> bool {
		matches!(self, RouteMethod::Any)
	}
}

impl fmt::Display for RouteMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			RouteMethod::Get => "GET",
			RouteMethod::Post => "POST",
			RouteMethod::Put => "PUT",
			RouteMethod::Delete => "DELETE",
			RouteMethod::Any => "ANY",
		};
		f.write_str(name)
	}
}

/// A registered mapping from (method, path pattern) to a handler value.
///
/// The handler payload is generic: the routing layer never inspects it,
/// it only hands a clone back on resolve.
#[derive(Debug, Clone)]
pub struct Route<H> {
	method: RouteMethod,
	pattern: PathPattern,
	handler: H,
	name: Option<String>,
}

impl<H> Route<H> {
	/// Create a route, parsing and validating the pattern.
	pub fn new(method: RouteMethod, pattern: &str, handler: H) -> Result<Self, RouteError> {
		Ok(Self {
			method,
			pattern: PathPattern::parse(pattern)?,
			handler,
			name: None,
		})
	}

	/// Attach a symbolic name, useful in logs.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn method(&self) -> RouteMethod {
		self.method
	}

	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	pub fn handler(&self) -> &H {
		&self.handler
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}
}
