//! Request dispatch for grappelli.
//!
//! A [`Dispatcher`] carries one request through a fixed lifecycle:
//! resolve the route, run interceptor `pre_handle` phases, bind the
//! handler's declared parameters, invoke the handler, run `post_handle`,
//! render the [`Outcome`] into a response, and finish with
//! `after_completion` for every interceptor whose `pre_handle` ran.
//! Any failure along the way detours through the two-tier
//! [`ExceptionResolver`] and still ends in `after_completion`.
//!
//! Handlers are plain async functions over [`BoundArguments`]; wrap them
//! with [`handler_fn`] and register them on a [`Controller`] or directly
//! on the [`DispatcherBuilder`].
//!
//! [`BoundArguments`]: grappelli_binding::BoundArguments
//!
//! # Examples
//!
//! ```
//! use grappelli_binding::ParamSpec;
//! use grappelli_dispatch::{handler_fn, Dispatcher, Outcome};
//! use grappelli_http::Request;
//! use grappelli_urls::RouteMethod;
//! use hyper::{Method, StatusCode};
//!
//! # tokio_test::block_on(async {
//! let dispatcher = Dispatcher::builder()
//!     .route(
//!         RouteMethod::Get,
//!         "/mvc/person",
//!         vec![ParamSpec::param::<String>("name")],
//!         handler_fn(|args| async move {
//!             let name: &String = args.get("name")?;
//!             Ok(Outcome::view("person").with_data("name", name.clone()))
//!         }),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/mvc/person?name=jay")
//!     .build()
//!     .unwrap();
//!
//! let response = dispatcher.dispatch(request).await;
//! assert_eq!(response.status, StatusCode::OK);
//! # });
//! ```

use grappelli_binding::BindError;
use grappelli_urls::RouteError;
use thiserror::Error;

pub mod controller;
pub mod dispatcher;
pub mod exception;
pub mod handler;
pub mod interceptor;
pub mod logging;
pub mod outcome;

pub use controller::Controller;
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use exception::{ErrorMatch, ExceptionHandler, ExceptionResolver};
pub use handler::{HandlerDescriptor, RouteHandler, handler_fn};
pub use interceptor::{Interceptor, InterceptorChain, PreHandle};
pub use logging::LoggingInterceptor;
pub use outcome::{Outcome, REDIRECT_PREFIX};

/// Any failure produced while dispatching one request.
///
/// Errors from the routing, binding, and http layers convert in via
/// `From`; handlers and interceptors report their own failures as
/// [`Handler`]. The dispatcher turns whichever of these reaches the end
/// of the lifecycle into a response, so none of them crosses between
/// requests.
///
/// [`Handler`]: DispatchError::Handler
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError {
	/// Route resolution failed (per-request miss or startup duplicate).
	#[error("routing failed: {0}")]
	Route(#[from] RouteError),

	/// A declared parameter could not be bound from the request.
	#[error("binding failed: {0}")]
	Bind(#[from] BindError),

	/// The request itself could not be read (bad multipart, oversized
	/// upload, ...).
	#[error("request failed: {0}")]
	Http(#[from] grappelli_http::Error),

	/// A handler or interceptor reported a failure.
	#[error("handler failed: {0}")]
	Handler(String),

	/// A failure past the point where exception resolution applies,
	/// such as rendering the outcome.
	#[error("unhandled failure: {0}")]
	Unhandled(String),
}

impl DispatchError {
	/// Wrap a handler-level failure message.
	pub fn handler(message: impl Into<String>) -> Self {
		Self::Handler(message.into())
	}

	/// HTTP status the generic error response should carry.
	pub fn status_code(&self) -> u16 {
		match self {
			Self::Route(RouteError::NotFound { .. }) => 404,
			Self::Route(_) => 500,
			Self::Bind(_) => 400,
			Self::Http(err) => err.status_code(),
			Self::Handler(_) => 500,
			Self::Unhandled(_) => 500,
		}
	}
}

impl From<serde_json::Error> for DispatchError {
	fn from(err: serde_json::Error) -> Self {
		Self::Handler(format!("serialization failed: {err}"))
	}
}

pub type Result<T> = std::result::Result<T, DispatchError>;
