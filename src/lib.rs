//! # Grappelli
//!
//! An MVC request-dispatch framework for Rust, inspired by Spring Web MVC.
//!
//! Grappelli builds the classic front-controller pipeline out of explicit,
//! composable pieces: a route table resolves each request, interceptors
//! wrap it, a binder converts raw request text into typed handler
//! arguments, and the handler's outcome is rendered back into a response.
//! There is no reflection and no annotation scanning; every route,
//! converter, interceptor, and exception handler is registered explicitly
//! at startup and the whole dispatcher is immutable afterwards.
//!
//! ## Core Principles
//!
//! - **Explicit over implicit**: routes and converters are registered in
//!   code, so a duplicate route is a startup error, not a runtime surprise
//! - **Typed at the boundary**: handlers receive already-converted values;
//!   conversion failures become structured [`BindError`]s
//! - **One error funnel**: every per-request failure flows through the
//!   same two-tier exception resolver and the same generic fallback
//! - **Async-first**: built on tokio and hyper from the ground up
//!
//! ## Quick Example
//!
//! ```
//! use grappelli::prelude::*;
//! use hyper::Method;
//!
//! # tokio_test::block_on(async {
//! let dispatcher = Dispatcher::builder()
//!     .controller(
//!         Controller::new("mvc")
//!             .route(
//!                 RouteMethod::Get,
//!                 "/mvc/person",
//!                 vec![
//!                     ParamSpec::param::<String>("name"),
//!                     ParamSpec::param::<Option<f64>>("age"),
//!                 ],
//!                 handler_fn(|args| async move {
//!                     let name: &String = args.get("name")?;
//!                     Ok(Outcome::view("person").with_data("name", name.clone()))
//!                 }),
//!             )
//!             .on_error(ErrorMatch::Any, |err| {
//!                 Outcome::view("error").with_data("exception", err.to_string())
//!             }),
//!     )
//!     .interceptor(std::sync::Arc::new(LoggingInterceptor::new()))
//!     .build()
//!     .unwrap();
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/mvc/person?name=jay&age=20")
//!     .build()
//!     .unwrap();
//!
//! let response = dispatcher.dispatch(request).await;
//! assert_eq!(response.status, StatusCode::OK);
//! # });
//! ```

// Module re-exports, one per framework crate
pub mod binding;
pub mod conf;
pub mod dispatch;
pub mod http;
pub mod server;
pub mod urls;

// Re-export HTTP primitives
pub use grappelli_http::{MultipartForm, Request, Response, UploadStore, UploadedFile};

// Re-export routing
pub use grappelli_urls::{PathPattern, Route, RouteError, RouteMatch, RouteMethod, RouteTable};

// Re-export parameter binding
pub use grappelli_binding::{
	BindContext, BindError, BindErrorKind, BindRecord, Binder, BoundArguments, ConverterRegistry,
	FromParam, ParamSource, ParamSpec, field,
};

// Re-export settings
pub use grappelli_conf::{Settings, SettingsError, UploadSettings};

// Re-export dispatch
pub use grappelli_dispatch::{
	Controller, DispatchError, Dispatcher, DispatcherBuilder, ErrorMatch, ExceptionHandler,
	ExceptionResolver, HandlerDescriptor, Interceptor, InterceptorChain, LoggingInterceptor,
	Outcome, PreHandle, RouteHandler, handler_fn,
};

// Re-export the HTTP transport
pub use grappelli_server::{HttpServer, serve};

// Re-export common external dependencies
pub use async_trait::async_trait;
pub use hyper::StatusCode;
pub use serde::{Deserialize, Serialize};
pub use tokio;

pub mod prelude {
	pub use crate::{
		BindContext,
		BindError,
		BindRecord,
		Controller,
		DispatchError,
		Dispatcher,
		ErrorMatch,
		Interceptor,
		InterceptorChain,
		LoggingInterceptor,
		Outcome,
		ParamSpec,
		PreHandle,
		Request,
		Response,
		RouteMethod,
		Settings,
		StatusCode,
		UploadStore,
		UploadedFile,
		// Free functions
		field,
		handler_fn,
		serve,
	};

	// External
	pub use async_trait::async_trait;
	pub use serde::{Deserialize, Serialize};
}
