//! The dispatcher: route resolution, interceptors, binding, invocation,
//! rendering, and error conversion for one request at a time.

use std::sync::Arc;

use grappelli_binding::{BindInput, Binder, BoundArguments, ConverterRegistry, ParamSpec};
use grappelli_http::{Request, Response};
use grappelli_urls::{RouteMethod, RouteTable};
use hyper::StatusCode;

use crate::controller::{Controller, ControllerRoute};
use crate::exception::{ErrorMatch, ExceptionHandler, ExceptionResolver};
use crate::handler::{HandlerDescriptor, RouteHandler};
use crate::interceptor::{Interceptor, InterceptorChain, PreVerdict};
use crate::{DispatchError, Outcome};

/// What a route resolves to: the handler descriptor plus the controller
/// scope its errors resolve under.
pub(crate) struct RouteEntry {
	controller: Option<String>,
	descriptor: HandlerDescriptor,
}

/// Dispatches requests through the full lifecycle:
///
/// ```text
/// Resolving → pre → Binding → Invoking → post → Rendering → after → Done
///                └──────────────── Erroring ───────────────┘   (also runs after)
/// ```
///
/// Everything inside is immutable after [`DispatcherBuilder::build`] and
/// shared across request tasks without locking. `dispatch` itself is
/// infallible: every per-request failure is converted to a response at
/// this boundary and never crosses into another request.
pub struct Dispatcher {
	routes: RouteTable<Arc<RouteEntry>>,
	interceptors: InterceptorChain,
	exceptions: ExceptionResolver,
	binder: Binder,
}

impl Dispatcher {
	pub fn builder() -> DispatcherBuilder {
		DispatcherBuilder::new()
	}

	/// Process one request to completion.
	pub async fn dispatch(&self, request: Request) -> Response {
		// Resolving. A miss answers directly: no interceptor has run, so
		// none gets an after_completion.
		let found = match self.routes.resolve(&request.method, request.path()) {
			Ok(found) => found,
			Err(err) => {
				tracing::debug!("no route for {} {}", request.method, request.path());
				return error_response(&DispatchError::Route(err));
			}
		};
		let mut request = request;
		for (name, value) in found.path_vars {
			request.set_path_param(name, value);
		}
		let entry = found.handler;
		let controller = entry.controller.as_deref();

		// Intercepting(pre)
		let (ran, verdict) = self.interceptors.run_pre(&request).await;
		match verdict {
			PreVerdict::Continue => {}
			PreVerdict::Halt(response) => {
				// Short-circuit: the interceptor's response is used as-is.
				self.interceptors.run_after(ran, &request, None).await;
				return response;
			}
			PreVerdict::Failed(err) => {
				return self.fail(ran, &request, controller, err).await;
			}
		}

		// Binding
		let args = match self.bind(&request, &entry) {
			Ok(args) => args,
			Err(err) => return self.fail(ran, &request, controller, err).await,
		};

		// Invoking
		let mut outcome = match entry.descriptor.handler().invoke(args).await {
			Ok(outcome) => outcome,
			Err(err) => return self.fail(ran, &request, controller, err).await,
		};

		// Intercepting(post)
		if let Err(err) = self.interceptors.run_post(&request, &mut outcome).await {
			return self.fail(ran, &request, controller, err).await;
		}

		// Rendering
		match outcome.into_response() {
			Ok(response) => {
				// Intercepting(after) → Done
				self.interceptors.run_after(ran, &request, None).await;
				response
			}
			Err(err) => {
				// Render failures are terminal; they never re-enter
				// exception resolution.
				tracing::warn!("rendering failed: {}", err);
				self.interceptors.run_after(ran, &request, Some(&err)).await;
				error_response(&err)
			}
		}
	}

	/// Erroring: resolve the error to an outcome if a handler matches,
	/// then always run after_completion with the original error.
	async fn fail(
		&self,
		ran: usize,
		request: &Request,
		controller: Option<&str>,
		err: DispatchError,
	) -> Response {
		tracing::debug!("{} {} failed: {}", request.method, request.path(), err);
		let response = match self.exceptions.resolve(controller, &err) {
			Some(outcome) => outcome.into_response().unwrap_or_else(|render_err| {
				tracing::warn!("error view failed to render: {}", render_err);
				error_response(&render_err)
			}),
			None => error_response(&err),
		};
		self.interceptors.run_after(ran, request, Some(&err)).await;
		response
	}

	/// Assemble the binder input from the parsed request and bind the
	/// entry's parameter specs.
	fn bind(&self, request: &Request, entry: &RouteEntry) -> Result<BoundArguments, DispatchError> {
		let multipart = request.multipart_form()?;
		let mut params = request.parameter_map();
		if let Some(form) = &multipart {
			for (key, value) in &form.fields {
				params.insert(key.clone(), value.clone());
			}
		}
		let input = BindInput {
			path_vars: &request.path_params,
			params: &params,
			files: multipart.as_ref().map(|form| &form.files),
			body: &request.body,
		};
		Ok(self.binder.bind(&input, entry.descriptor.specs())?)
	}
}

fn error_response(err: &DispatchError) -> Response {
	let status =
		StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
	let body = serde_json::json!({ "error": err.to_string() });
	match Response::new(status).with_json(&body) {
		Ok(response) => response,
		Err(_) => Response::new(status),
	}
}

/// Builds a [`Dispatcher`]. Routes stay pending until [`build`]
/// (`DuplicateRouteError` is a startup failure, not a runtime one).
///
/// [`build`]: DispatcherBuilder::build
///
/// # Examples
///
/// ```
/// use grappelli_dispatch::{handler_fn, Controller, Dispatcher, Outcome};
/// use grappelli_http::Request;
/// use grappelli_urls::RouteMethod;
/// use hyper::{Method, StatusCode};
///
/// # tokio_test::block_on(async {
/// let dispatcher = Dispatcher::builder()
///     .controller(Controller::new("mvc").route(
///         RouteMethod::Get,
///         "/mvc/hello",
///         vec![],
///         handler_fn(|_args| async { Ok(Outcome::view("hello")) }),
///     ))
///     .build()
///     .unwrap();
///
/// let request = Request::builder()
///     .method(Method::GET)
///     .uri("/mvc/hello")
///     .build()
///     .unwrap();
///
/// let response = dispatcher.dispatch(request).await;
/// assert_eq!(response.status, StatusCode::OK);
/// # });
/// ```
#[derive(Default)]
pub struct DispatcherBuilder {
	controllers: Vec<Controller>,
	routes: Vec<ControllerRoute>,
	interceptors: InterceptorChain,
	globals: Vec<(ErrorMatch, ExceptionHandler)>,
	registry: Option<ConverterRegistry>,
	date_format: Option<String>,
}

impl DispatcherBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a controller and everything it declares.
	pub fn controller(mut self, controller: Controller) -> Self {
		self.controllers.push(controller);
		self
	}

	/// Add a route outside any controller scope.
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

	/// Append an interceptor; registration order is execution order.
	pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
		self.interceptors.push(interceptor);
		self
	}

	/// Register a global exception handler.
	pub fn exception_handler(
		mut self,
		matcher: ErrorMatch,
		handler: impl Fn(&DispatchError) -> Outcome + Send + Sync + 'static,
	) -> Self {
		self.globals.push((matcher, Arc::new(handler)));
		self
	}

	/// Replace the converter registry (defaults to
	/// [`ConverterRegistry::with_defaults`]).
	pub fn registry(mut self, registry: ConverterRegistry) -> Self {
		self.registry = Some(registry);
		self
	}

	/// Set the process-wide date format for parameter binding.
	pub fn date_format(mut self, format: impl Into<String>) -> Self {
		self.date_format = Some(format.into());
		self
	}

	/// Materialize the dispatcher. Fails on the first duplicate
	/// (method, pattern) registration.
	pub fn build(self) -> Result<Dispatcher, DispatchError> {
		let mut routes = RouteTable::new();
		let mut exceptions = ExceptionResolver::new();

		for controller in self.controllers {
			let (name, controller_routes, handlers) = controller.into_parts();
			for (matcher, handler) in handlers {
				exceptions.add_local(name.clone(), matcher, handler);
			}
			for route in controller_routes {
				let entry = Arc::new(RouteEntry {
					controller: Some(name.clone()),
					descriptor: route.descriptor,
				});
				routes.register(route.method, &route.pattern, entry)?;
			}
		}
		for route in self.routes {
			let entry = Arc::new(RouteEntry {
				controller: None,
				descriptor: route.descriptor,
			});
			routes.register(route.method, &route.pattern, entry)?;
		}
		for (matcher, handler) in self.globals {
			exceptions.add_global(matcher, handler);
		}

		let mut binder = Binder::new(Arc::new(self.registry.unwrap_or_default()));
		if let Some(format) = self.date_format {
			binder = binder.with_date_format(format);
		}

		tracing::debug!("dispatcher built with {} routes", routes.len());
		Ok(Dispatcher {
			routes,
			interceptors: self.interceptors,
			exceptions,
			binder,
		})
	}
}
