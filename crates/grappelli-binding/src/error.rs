/// A recoverable per-request failure during argument binding.
///
/// Binding is strict: the first failing parameter aborts the whole bind
/// and no partial [`BoundArguments`](crate::BoundArguments) is produced.
/// The dispatcher routes these through the exception resolver rather than
/// answering directly.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum BindError {
	/// A path-sourced parameter has no matching extracted path variable.
	#[error("path variable `{name}` is missing")]
	PathVariableMissing { name: String },

	/// A file-sourced parameter was declared but the request body is not
	/// `multipart/form-data`.
	#[error("file parameter requires a multipart/form-data request")]
	NotMultipart,

	/// A date value did not parse under the configured date format.
	#[error("malformed date: `{raw}`")]
	MalformedDate { raw: String },

	/// A parameter value could not be converted to its declared type.
	#[error("parameter `{param}`: cannot convert `{raw}` to {expected}")]
	TypeMismatch {
		param: String,
		raw: String,
		expected: &'static str,
	},

	/// A required parameter (or multipart file part) was absent.
	#[error("required parameter `{name}` is missing")]
	MissingParameter { name: String },

	/// No converter is registered for the parameter's declared type.
	#[error("no converter registered for type `{ty}`")]
	UnsupportedType { ty: &'static str },

	/// A bound argument was requested under the wrong type.
	#[error("argument `{name}` is not a `{expected}`")]
	ArgumentType {
		name: String,
		expected: &'static str,
	},
}

/// Data-free discriminant of [`BindError`], used by exception-handler
/// registrations to match one exact failure kind.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindErrorKind {
	PathVariableMissing,
	NotMultipart,
	MalformedDate,
	TypeMismatch,
	MissingParameter,
	UnsupportedType,
	ArgumentType,
}

impl BindError {
	pub fn kind(&self) -> BindErrorKind {
		match self {
			BindError::PathVariableMissing { .. } => BindErrorKind::PathVariableMissing,
			BindError::NotMultipart => BindErrorKind::NotMultipart,
			BindError::MalformedDate { .. } => BindErrorKind::MalformedDate,
			BindError::TypeMismatch { .. } => BindErrorKind::TypeMismatch,
			BindError::MissingParameter { .. } => BindErrorKind::MissingParameter,
			BindError::UnsupportedType { .. } => BindErrorKind::UnsupportedType,
			BindError::ArgumentType { .. } => BindErrorKind::ArgumentType,
		}
	}
}

pub type Result<T> = std::result::Result<T, BindError>;
