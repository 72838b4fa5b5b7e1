//! Controllers: named route groups sharing local exception handlers.

use std::sync::Arc;

use grappelli_binding::ParamSpec;
use grappelli_urls::RouteMethod;

use crate::exception::{ErrorMatch, ExceptionHandler};
use crate::handler::{HandlerDescriptor, RouteHandler};
use crate::{DispatchError, Outcome};

pub(crate) struct ControllerRoute {
	pub(crate) method: RouteMethod,
	pub(crate) pattern: String,
	pub(crate) descriptor: HandlerDescriptor,
}

/// A named group of routes. Exception handlers registered on the
/// controller catch errors from its routes before any global handler is
/// consulted.
///
/// # Examples
///
/// ```
/// use grappelli_binding::ParamSpec;
/// use grappelli_dispatch::{handler_fn, Controller, ErrorMatch, Outcome};
/// use grappelli_urls::RouteMethod;
///
/// let controller = Controller::new("mvc")
///     .route(
///         RouteMethod::Any,
///         "/mvc/hello",
///         vec![],
///         handler_fn(|_args| async { Ok(Outcome::view("hello")) }),
///     )
///     .on_error(ErrorMatch::Any, |err| {
///         Outcome::view("error").with_data("exception", err.to_string())
///     });
///
/// assert_eq!(controller.name(), "mvc");
/// ```
pub struct Controller {
	name: String,
	routes: Vec<ControllerRoute>,
	handlers: Vec<(ErrorMatch, ExceptionHandler)>,
}

impl Controller {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			routes: Vec::new(),
			handlers: Vec::new(),
		}
	}

	/// Add a route. Parameter specs declare, in order, what the binder
	/// feeds the handler.
	pub fn route(
		mut self,
		method: RouteMethod,
		pattern: impl Into<String>,
		specs: Vec<ParamSpec>,
		handler: Arc<dyn RouteHandler>,
	) -> Self {
		self.routes.push(ControllerRoute {
			method,
			pattern: pattern.into(),
			descriptor: HandlerDescriptor::new(specs, handler),
		});
		self
	}

	/// Register a controller-local exception handler.
	pub fn on_error(
		mut self,
		matcher: ErrorMatch,
		handler: impl Fn(&DispatchError) -> Outcome + Send + Sync + 'static,
	) -> Self {
		self.handlers.push((matcher, Arc::new(handler)));
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn into_parts(
		self,
	) -> (
		String,
		Vec<ControllerRoute>,
		Vec<(ErrorMatch, ExceptionHandler)>,
	) {
		(self.name, self.routes, self.handlers)
	}
}
