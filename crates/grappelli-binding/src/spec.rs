use std::any::TypeId;

use crate::convert::FromParam;
use crate::record::BindRecord;

/// Where a parameter's raw value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
	/// A variable extracted by route resolution.
	Path,
	/// The merged query/form/multipart-field parameter map.
	Param,
	/// A multipart file part.
	File,
	/// The raw request body.
	Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamKind {
	Scalar,
	Record,
	Raw,
}

/// Declares one handler parameter: its argument name, where its raw value
/// comes from, and the type it converts to.
///
/// Specs are built at registration time and stay immutable; the binder
/// walks them in order for every request.
///
/// # Examples
///
/// ```
/// use grappelli_binding::{ParamSource, ParamSpec};
///
/// let spec = ParamSpec::path::<i64>("id");
/// assert_eq!(spec.name(), "id");
/// assert_eq!(spec.source(), ParamSource::Path);
/// ```
#[derive(Debug, Clone)]
pub struct ParamSpec {
	pub(crate) name: String,
	pub(crate) source: ParamSource,
	pub(crate) kind: ParamKind,
	pub(crate) type_id: Option<TypeId>,
	pub(crate) type_name: &'static str,
}

impl ParamSpec {
	/// A scalar converted from a path variable.
	pub fn path<T: FromParam>(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: ParamSource::Path,
			kind: ParamKind::Scalar,
			type_id: Some(TypeId::of::<T>()),
			type_name: std::any::type_name::<T>(),
		}
	}

	/// A scalar converted from the parameter map.
	pub fn param<T: FromParam>(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: ParamSource::Param,
			kind: ParamKind::Scalar,
			type_id: Some(TypeId::of::<T>()),
			type_name: std::any::type_name::<T>(),
		}
	}

	/// A record auto-boxed field-by-field from the parameter map.
	///
	/// The `name` is only the argument slot the bound record is stored
	/// under; field lookup uses the record's own field names.
	pub fn record<T: BindRecord>(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: ParamSource::Param,
			kind: ParamKind::Record,
			type_id: Some(TypeId::of::<T>()),
			type_name: std::any::type_name::<T>(),
		}
	}

	/// An uploaded file taken from a multipart part of the same name.
	pub fn file(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: ParamSource::File,
			kind: ParamKind::Raw,
			type_id: None,
			type_name: "file",
		}
	}

	/// The raw request body bytes.
	pub fn body(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			source: ParamSource::Body,
			kind: ParamKind::Raw,
			type_id: None,
			type_name: "body",
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn source(&self) -> ParamSource {
		self.source
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}
}
