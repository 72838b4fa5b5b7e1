use async_trait::async_trait;
use grappelli_http::Request;

use crate::interceptor::{Interceptor, PreHandle};
use crate::{DispatchError, Outcome};

/// Logging interceptor.
/// Emits a `tracing` line at each of the three interceptor phases.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use grappelli_dispatch::{Interceptor, LoggingInterceptor, PreHandle};
/// use grappelli_http::Request;
/// use hyper::Method;
///
/// # tokio_test::block_on(async {
/// let interceptor = LoggingInterceptor::new();
/// let request = Request::builder()
///     .method(Method::GET)
///     .uri("/mvc/hello")
///     .build()
///     .unwrap();
///
/// let decision = interceptor.pre_handle(&request).await.unwrap();
/// assert!(matches!(decision, PreHandle::Continue));
/// # });
/// ```
pub struct LoggingInterceptor;

impl LoggingInterceptor {
	pub fn new() -> Self {
		Self
	}
}

impl Default for LoggingInterceptor {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Interceptor for LoggingInterceptor {
	async fn pre_handle(&self, request: &Request) -> Result<PreHandle, DispatchError> {
		tracing::info!("--> {} {}", request.method, request.path());
		Ok(PreHandle::Continue)
	}

	async fn post_handle(
		&self,
		request: &Request,
		outcome: &mut Outcome,
	) -> Result<(), DispatchError> {
		match outcome {
			Outcome::View { name, .. } => {
				tracing::info!("{} {} -> view `{}`", request.method, request.path(), name);
			}
			Outcome::Redirect(target) => {
				tracing::info!("{} {} -> redirect `{}`", request.method, request.path(), target);
			}
			Outcome::Json(_) => {
				tracing::info!("{} {} -> json body", request.method, request.path());
			}
		}
		Ok(())
	}

	async fn after_completion(
		&self,
		request: &Request,
		error: Option<&DispatchError>,
	) -> Result<(), DispatchError> {
		match error {
			Some(err) => {
				tracing::warn!("<-- {} {} failed: {}", request.method, request.path(), err);
			}
			None => {
				tracing::info!("<-- {} {} completed", request.method, request.path());
			}
		}
		Ok(())
	}
}
