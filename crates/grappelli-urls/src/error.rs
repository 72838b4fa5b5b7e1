use crate::route::RouteMethod;

/// Routing errors.
///
/// `Duplicate` and `InvalidPattern` surface at startup registration time
/// and are fatal configuration errors; `NotFound` is the per-request
/// resolve miss.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
	#[error("duplicate route: {method} {pattern}")]
	Duplicate { method: RouteMethod, pattern: String },

	#[error("no route for {method} {path}")]
	NotFound { method: String, path: String },

	#[error("invalid route pattern {pattern}: {reason}")]
	InvalidPattern { pattern: String, reason: String },
}
