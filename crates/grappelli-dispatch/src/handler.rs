//! Handlers: the code a route dispatches to.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use grappelli_binding::{BoundArguments, ParamSpec};

use crate::{DispatchError, Outcome};

/// A request handler: typed bound arguments in, an [`Outcome`] out.
///
/// Handlers never see the raw request; everything they need arrives
/// through the binder according to their parameter specs.
#[async_trait]
pub trait RouteHandler: Send + Sync {
	async fn invoke(&self, args: BoundArguments) -> Result<Outcome, DispatchError>;
}

/// Wrap an async closure as a handler.
///
/// # Examples
///
/// ```
/// use grappelli_dispatch::{handler_fn, Outcome};
///
/// # tokio_test::block_on(async {
/// let handler = handler_fn(|args| async move {
///     let name: &String = args.get("name")?;
///     Ok(Outcome::view("hello").with_data("name", name.clone()))
/// });
///
/// let mut args = grappelli_binding::BoundArguments::new();
/// args.insert(
///     "name",
///     grappelli_binding::BoundValue::Value(std::sync::Arc::new("jay".to_string())),
/// );
///
/// let outcome = handler.invoke(args).await.unwrap();
/// assert_eq!(outcome.view_name(), Some("hello"));
/// # });
/// ```
pub fn handler_fn<F, Fut>(func: F) -> Arc<dyn RouteHandler>
where
	F: Fn(BoundArguments) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Outcome, DispatchError>> + Send + 'static,
{
	Arc::new(FnHandler { func })
}

struct FnHandler<F> {
	func: F,
}

#[async_trait]
impl<F, Fut> RouteHandler for FnHandler<F>
where
	F: Fn(BoundArguments) -> Fut + Send + Sync,
	Fut: Future<Output = Result<Outcome, DispatchError>> + Send,
{
	async fn invoke(&self, args: BoundArguments) -> Result<Outcome, DispatchError> {
		(self.func)(args).await
	}
}

/// A handler plus the ordered parameter specs the binder feeds it.
pub struct HandlerDescriptor {
	specs: Vec<ParamSpec>,
	handler: Arc<dyn RouteHandler>,
}

impl HandlerDescriptor {
	pub fn new(specs: Vec<ParamSpec>, handler: Arc<dyn RouteHandler>) -> Self {
		Self { specs, handler }
	}

	pub fn specs(&self) -> &[ParamSpec] {
		&self.specs
	}

	pub fn handler(&self) -> &Arc<dyn RouteHandler> {
		&self.handler
	}
}
