use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use grappelli_http::UploadedFile;

use crate::error::BindError;

/// One converted handler argument.
pub enum BoundValue {
	/// A typed scalar or record produced by a converter.
	Value(Arc<dyn Any + Send + Sync>),
	/// An uploaded multipart file part.
	File(UploadedFile),
	/// Raw request body bytes.
	Body(Bytes),
}

impl std::fmt::Debug for BoundValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			BoundValue::Value(_) => f.write_str("Value(..)"),
			BoundValue::File(file) => f.debug_tuple("File").field(&file.original_name).finish(),
			BoundValue::Body(bytes) => f.debug_tuple("Body").field(&bytes.len()).finish(),
		}
	}
}

/// The converted arguments for one handler invocation.
///
/// Request-local: produced by the binder, read by the handler, dropped when
/// the request completes. Lookup is by the declared parameter name.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use grappelli_binding::{BoundArguments, BoundValue};
///
/// let mut args = BoundArguments::new();
/// args.insert("id", BoundValue::Value(Arc::new(42i64)));
///
/// assert_eq!(args.get::<i64>("id").unwrap(), &42);
/// assert!(args.get::<String>("id").is_err());
/// assert!(args.get::<i64>("missing").is_err());
/// ```
#[derive(Debug, Default)]
pub struct BoundArguments {
	values: HashMap<String, BoundValue>,
}

impl BoundArguments {
	pub fn new() -> Self {
		Self {
			values: HashMap::new(),
		}
	}

	pub fn insert(&mut self, name: impl Into<String>, value: BoundValue) {
		self.values.insert(name.into(), value);
	}

	/// Typed access to a converted argument.
	pub fn get<T: 'static>(&self, name: &str) -> Result<&T, BindError> {
		match self.values.get(name) {
			Some(BoundValue::Value(value)) => {
				value.downcast_ref::<T>().ok_or_else(|| BindError::ArgumentType {
					name: name.to_string(),
					expected: std::any::type_name::<T>(),
				})
			}
			Some(_) => Err(BindError::ArgumentType {
				name: name.to_string(),
				expected: std::any::type_name::<T>(),
			}),
			None => Err(BindError::MissingParameter {
				name: name.to_string(),
			}),
		}
	}

	/// The uploaded file bound under `name`.
	pub fn file(&self, name: &str) -> Result<&UploadedFile, BindError> {
		match self.values.get(name) {
			Some(BoundValue::File(file)) => Ok(file),
			Some(_) => Err(BindError::ArgumentType {
				name: name.to_string(),
				expected: "file",
			}),
			None => Err(BindError::MissingParameter {
				name: name.to_string(),
			}),
		}
	}

	/// The raw body bytes bound under `name`.
	pub fn body(&self, name: &str) -> Result<&Bytes, BindError> {
		match self.values.get(name) {
			Some(BoundValue::Body(bytes)) => Ok(bytes),
			Some(_) => Err(BindError::ArgumentType {
				name: name.to_string(),
				expected: "body",
			}),
			None => Err(BindError::MissingParameter {
				name: name.to_string(),
			}),
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}
