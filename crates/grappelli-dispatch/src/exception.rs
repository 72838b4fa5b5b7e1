//! Two-tier exception-handler lookup.
//!
//! Handlers register either local to one controller or globally. When a
//! request fails, the failing handler's controller tier is consulted
//! first and exhausted before the global tier — a local catch-all
//! therefore beats a global exact match. Within a tier the most specific
//! registration wins; ties go to the first registered.

use std::collections::HashMap;
use std::sync::Arc;

use grappelli_binding::BindErrorKind;

use crate::{DispatchError, Outcome};

/// Which errors an exception-handler registration catches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMatch {
	/// Exactly one bind-error kind.
	BindKind(BindErrorKind),
	/// Any bind error.
	Bind,
	/// Any error raised inside a handler body.
	Handler,
	/// Any error at all.
	Any,
}

impl ErrorMatch {
	pub fn matches(&self, error: &DispatchError) -> bool {
		match self {
			ErrorMatch::BindKind(kind) => {
				matches!(error, DispatchError::Bind(err) if err.kind() == *kind)
			}
			ErrorMatch::Bind => matches!(error, DispatchError::Bind(_)),
			ErrorMatch::Handler => matches!(error, DispatchError::Handler(_)),
			ErrorMatch::Any => true,
		}
	}

	/// Higher wins: an exact kind beats a family match beats a catch-all.
	fn specificity(&self) -> u8 {
		match self {
			ErrorMatch::BindKind(_) => 2,
			ErrorMatch::Bind | ErrorMatch::Handler => 1,
			ErrorMatch::Any => 0,
		}
	}
}

/// An exception handler: receives the error, produces the error outcome
/// (typically an error view with the error text bound into its data).
pub type ExceptionHandler = Arc<dyn Fn(&DispatchError) -> Outcome + Send + Sync>;

/// The two-tier lookup structure the dispatcher consults when a request
/// errors. Built at startup, immutable afterwards.
#[derive(Default)]
pub struct ExceptionResolver {
	local: HashMap<String, Vec<(ErrorMatch, ExceptionHandler)>>,
	global: Vec<(ErrorMatch, ExceptionHandler)>,
}

impl ExceptionResolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a handler local to one controller.
	pub fn add_local(&mut self, controller: impl Into<String>, matcher: ErrorMatch, handler: ExceptionHandler) {
		self.local
			.entry(controller.into())
			.or_default()
			.push((matcher, handler));
	}

	/// Register a handler independent of any controller.
	pub fn add_global(&mut self, matcher: ErrorMatch, handler: ExceptionHandler) {
		self.global.push((matcher, handler));
	}

	/// Find the best-matching handler and produce its outcome. `None`
	/// means no handler matched and the error is fatal to the request.
	pub fn resolve(&self, controller: Option<&str>, error: &DispatchError) -> Option<Outcome> {
		if let Some(name) = controller
			&& let Some(entries) = self.local.get(name)
			&& let Some(outcome) = Self::best(entries, error)
		{
			return Some(outcome);
		}
		Self::best(&self.global, error)
	}

	fn best(entries: &[(ErrorMatch, ExceptionHandler)], error: &DispatchError) -> Option<Outcome> {
		let mut chosen: Option<&(ErrorMatch, ExceptionHandler)> = None;
		for entry in entries {
			if !entry.0.matches(error) {
				continue;
			}
			// Strict comparison keeps the first registered on ties.
			let better = match chosen {
				None => true,
				Some((current, _)) => entry.0.specificity() > current.specificity(),
			};
			if better {
				chosen = Some(entry);
			}
		}
		chosen.map(|(_, handler)| handler(error))
	}
}
