use hyper::Method;
use std::collections::HashMap;

use crate::route::{Route, RouteMethod};
use crate::RouteError;

/// A successful route resolution: the registered handler payload plus
/// the path variables the pattern extracted.
#[derive(Debug, Clone)]
pub struct RouteMatch<H> {
	pub handler: H,
	pub path_vars: HashMap<String, String>,
	/// Pattern string of the winning route, for logging.
	pub pattern: String,
}

/// The route table: every (method, pattern) registration of the
/// application, built once at startup and read-only afterwards.
///
/// Registration rejects a second route whose method equals an existing
/// one and whose pattern matches the same set of paths — variable names
/// do not disambiguate, so `/user/{id}` and `/user/{uid}` collide.
/// `ANY` and a specific method on the same pattern are distinct
/// registrations: resolve prefers the specific one.
///
/// # Examples
///
/// ```
/// use grappelli_urls::{RouteMethod, RouteTable};
/// use hyper::Method;
///
/// let mut table = RouteTable::new();
/// table.register(RouteMethod::Get, "/user/{id}", "get-user").unwrap();
/// table.register(RouteMethod::Any, "/user/{id}", "any-user").unwrap();
///
/// let found = table.resolve(&Method::GET, "/user/42").unwrap();
/// assert_eq!(found.handler, "get-user");
/// assert_eq!(found.path_vars.get("id"), Some(&"42".to_string()));
///
/// let found = table.resolve(&Method::DELETE, "/user/42").unwrap();
/// assert_eq!(found.handler, "any-user");
/// ```
#[derive(Debug, Default)]
pub struct RouteTable<H> {
	routes: Vec<Route<H>>,
}

impl<H: Clone> RouteTable<H> {
	pub fn new() -> Self {
		Self { routes: Vec::new() }
	}

	/// Register a route, failing on a duplicate (method, pattern) pair.
	pub fn register(
		&mut self,
		method: RouteMethod,
		pattern: &str,
		handler: H,
	) -> Result<(), RouteError> {
		self.add(Route::new(method, pattern, handler)?)
	}

	/// Add an already-constructed route, applying the same duplicate check.
	pub fn add(&mut self, route: Route<H>) -> Result<(), RouteError> {
		let duplicate = self.routes.iter().any(|existing| {
			existing.method() == route.method() && existing.pattern().same_shape(route.pattern())
		});
		if duplicate {
			return Err(RouteError::Duplicate {
				method: route.method(),
				pattern: route.pattern().as_str().to_string(),
			});
		}
		self.routes.push(route);
		Ok(())
	}

	/// Resolve a request to a handler and its extracted path variables.
	///
	/// Method-specific routes win over `ANY` routes; within a tier the
	/// first matching registration wins. A miss is `RouteError::NotFound`.
	pub fn resolve(&self, method: &Method, path: &str) -> Result<RouteMatch<H>, RouteError> {
		let mut wildcard: Option<RouteMatch<H>> = None;

		for route in &self.routes {
			if !route.method().matches(method) {
				continue;
			}
			let Some(path_vars) = route.pattern().matches(path) else {
				continue;
			};
			let found = RouteMatch {
				handler: route.handler().clone(),
				path_vars,
				pattern: route.pattern().as_str().to_string(),
			};
			if route.method().is_any() {
				if wildcard.is_none() {
					wildcard = Some(found);
				}
			} else {
				return Ok(found);
			}
		}

		wildcard.ok_or_else(|| RouteError::NotFound {
			method: method.to_string(),
			path: path.to_string(),
		})
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	pub fn routes(&self) -> &[Route<H>] {
		&self.routes
	}
}
