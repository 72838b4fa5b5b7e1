//! Handler outcomes and their rendering.

use grappelli_http::Response;
use serde_json::{Map, Value};

use crate::DispatchError;

/// View-string prefix that turns a view name into a redirect.
pub const REDIRECT_PREFIX: &str = "redirect:";

/// What a handler hands back to the dispatcher.
///
/// Rendering is the dispatcher's job: a [`Outcome::View`] becomes a JSON
/// envelope carrying the logical view name and its data map (actual markup
/// rendering belongs to an external collaborator), a [`Outcome::Redirect`]
/// becomes a `302` with `Location`, and a [`Outcome::Json`] is written
/// directly as `application/json`, bypassing view resolution.
///
/// # Examples
///
/// ```
/// use grappelli_dispatch::Outcome;
///
/// assert!(matches!(Outcome::from_view_string("hello"), Outcome::View { .. }));
/// assert_eq!(
///     Outcome::from_view_string("redirect:hello"),
///     Outcome::Redirect("hello".to_string()),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
	/// A logical view name plus the data the view renders with.
	View {
		name: String,
		data: Map<String, Value>,
	},
	/// An HTTP redirect to the given target.
	Redirect(String),
	/// A JSON body, bypassing view resolution.
	Json(Value),
}

impl Outcome {
	/// A view outcome with an empty data map.
	pub fn view(name: impl Into<String>) -> Self {
		Outcome::View {
			name: name.into(),
			data: Map::new(),
		}
	}

	/// A redirect outcome.
	pub fn redirect(target: impl Into<String>) -> Self {
		Outcome::Redirect(target.into())
	}

	/// A JSON outcome. Typed payloads go through
	/// `serde_json::to_value` first.
	pub fn json(value: impl Into<Value>) -> Self {
		Outcome::Json(value.into())
	}

	/// Interpret a view string the way handlers return them: a
	/// [`REDIRECT_PREFIX`] makes it a redirect, anything else is a logical
	/// view name.
	pub fn from_view_string(view: &str) -> Self {
		match view.strip_prefix(REDIRECT_PREFIX) {
			Some(target) => Outcome::Redirect(target.to_string()),
			None => Outcome::view(view),
		}
	}

	/// Add an entry to a view's data map. Non-view outcomes are left
	/// untouched.
	pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		if let Outcome::View { data, .. } = &mut self {
			data.insert(key.into(), value.into());
		}
		self
	}

	/// The logical view name, when this outcome is a view.
	pub fn view_name(&self) -> Option<&str> {
		match self {
			Outcome::View { name, .. } => Some(name),
			_ => None,
		}
	}

	/// Render to a response.
	///
	/// Failures here are terminal for the request: they surface as
	/// [`DispatchError::Unhandled`] and never re-enter exception
	/// resolution.
	pub fn into_response(self) -> Result<Response, DispatchError> {
		match self {
			Outcome::View { name, data } => Response::ok()
				.with_json(&serde_json::json!({ "view": name, "data": data }))
				.map_err(|err| DispatchError::Unhandled(err.to_string())),
			Outcome::Redirect(target) => Ok(Response::temporary_redirect(target)),
			Outcome::Json(value) => Response::ok()
				.with_json(&value)
				.map_err(|err| DispatchError::Unhandled(err.to_string())),
		}
	}
}
