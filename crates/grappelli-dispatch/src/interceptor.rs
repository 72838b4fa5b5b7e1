//! Interceptors: ordered pre/post/after hooks around handler execution.

use std::sync::Arc;

use async_trait::async_trait;
use grappelli_http::{Request, Response};

use crate::{DispatchError, Outcome};

/// Decision returned by [`Interceptor::pre_handle`].
#[derive(Debug)]
pub enum PreHandle {
	/// Keep going.
	Continue,
	/// Stop the chain: later interceptors never run their `pre_handle`,
	/// the handler is never invoked, and this response answers the request.
	Halt(Response),
}

/// A hook around handler execution.
///
/// All three callbacks are optional; the defaults do nothing. The chain
/// calls them as follows:
///
/// - `pre_handle` in registration order; the first [`PreHandle::Halt`]
///   aborts the chain.
/// - `post_handle` in the same forward order, only when every
///   `pre_handle` continued and the handler was actually invoked.
/// - `after_completion` for every interceptor whose `pre_handle` ran, in
///   forward registration order, unconditionally — including after a halt
///   or an error. It receives the error when there was one.
#[async_trait]
pub trait Interceptor: Send + Sync {
	/// Runs before binding and handler invocation.
	async fn pre_handle(&self, request: &Request) -> Result<PreHandle, DispatchError> {
		let _ = request;
		Ok(PreHandle::Continue)
	}

	/// Runs after a successful handler invocation, before rendering. May
	/// rewrite the outcome.
	async fn post_handle(
		&self,
		request: &Request,
		outcome: &mut Outcome,
	) -> Result<(), DispatchError> {
		let _ = (request, outcome);
		Ok(())
	}

	/// Runs once the request is finished, successful or not. Failures
	/// raised here are logged and swallowed, never re-thrown.
	async fn after_completion(
		&self,
		request: &Request,
		error: Option<&DispatchError>,
	) -> Result<(), DispatchError> {
		let _ = (request, error);
		Ok(())
	}
}

/// What the pre phase decided.
pub(crate) enum PreVerdict {
	Continue,
	Halt(Response),
	Failed(DispatchError),
}

/// Ordered interceptor list, immutable after startup.
#[derive(Default)]
pub struct InterceptorChain {
	entries: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
		self.entries.push(interceptor);
		self
	}

	pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
		self.entries.push(interceptor);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Run the pre phase. Returns how many interceptors ran their
	/// `pre_handle` — the halting or failing one included — so exactly
	/// those can be given their `after_completion` later.
	pub(crate) async fn run_pre(&self, request: &Request) -> (usize, PreVerdict) {
		for (index, entry) in self.entries.iter().enumerate() {
			let ran = index + 1;
			match entry.pre_handle(request).await {
				Ok(PreHandle::Continue) => {}
				Ok(PreHandle::Halt(response)) => return (ran, PreVerdict::Halt(response)),
				Err(err) => return (ran, PreVerdict::Failed(err)),
			}
		}
		(self.entries.len(), PreVerdict::Continue)
	}

	/// Run the post phase in forward order. Only called when the whole pre
	/// phase continued and the handler was invoked.
	pub(crate) async fn run_post(
		&self,
		request: &Request,
		outcome: &mut Outcome,
	) -> Result<(), DispatchError> {
		for entry in &self.entries {
			entry.post_handle(request, outcome).await?;
		}
		Ok(())
	}

	/// Run `after_completion` for the first `ran` interceptors, forward
	/// order, unconditionally. Their own failures are logged and swallowed.
	pub(crate) async fn run_after(
		&self,
		ran: usize,
		request: &Request,
		error: Option<&DispatchError>,
	) {
		for entry in self.entries.iter().take(ran) {
			if let Err(err) = entry.after_completion(request, error).await {
				tracing::warn!("after_completion failed: {}", err);
			}
		}
	}
}
