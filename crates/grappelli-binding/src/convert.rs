//! Per-type value conversion and the converter registry.
//!
//! Conversion is explicit: every type a handler parameter can take must be
//! registered in a [`ConverterRegistry`], keyed by [`TypeId`]. There is no
//! reflection — scalar types implement [`FromParam`], record types implement
//! [`BindRecord`](crate::BindRecord) and are registered separately.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::BindError;
use crate::record::{BindRecord, ErasedRecordBinder, TypedRecordBinder};

/// Date format used when none is configured.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Shared conversion context.
///
/// Carries the single process-wide date format; converters that do not
/// involve dates ignore it.
#[derive(Debug, Clone)]
pub struct BindContext {
	date_format: String,
}

impl BindContext {
	pub fn new() -> Self {
		Self {
			date_format: DEFAULT_DATE_FORMAT.to_string(),
		}
	}

	/// Replace the date format used by date converters.
	///
	/// The format is a `chrono` strftime string, e.g. `%Y-%m-%d`.
	pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
		self.date_format = format.into();
		self
	}

	pub fn date_format(&self) -> &str {
		&self.date_format
	}
}

impl Default for BindContext {
	fn default() -> Self {
		Self::new()
	}
}

/// Failure converting one raw string into a typed value.
///
/// Carries no parameter name; the binder attaches one via
/// [`ConvertError::into_bind_error`] when it knows which parameter the
/// value belonged to.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
	#[error("cannot convert `{raw}` to {expected}")]
	TypeMismatch { raw: String, expected: &'static str },

	#[error("malformed date: `{raw}`")]
	MalformedDate { raw: String },
}

impl ConvertError {
	/// Attach the owning parameter name, producing the bind-level error.
	pub fn into_bind_error(self, param: &str) -> BindError {
		match self {
			ConvertError::TypeMismatch { raw, expected } => BindError::TypeMismatch {
				param: param.to_string(),
				raw,
				expected,
			},
			ConvertError::MalformedDate { raw } => BindError::MalformedDate { raw },
		}
	}
}

/// A type constructible from one raw request parameter value.
///
/// # Examples
///
/// ```
/// use grappelli_binding::{BindContext, FromParam};
///
/// let ctx = BindContext::new();
///
/// assert_eq!(i32::from_param("42", &ctx).unwrap(), 42);
/// assert!(i32::from_param("forty-two", &ctx).is_err());
/// ```
pub trait FromParam: Sized + Send + Sync + 'static {
	/// Convert one raw parameter value.
	fn from_param(raw: &str, ctx: &BindContext) -> Result<Self, ConvertError>;

	/// Value to bind when the parameter is absent from the request.
	///
	/// `None` (the default) makes absence a bind failure; `Option<T>`
	/// overrides this so absent parameters bind as `None`.
	fn absent() -> Option<Self> {
		None
	}
}

impl FromParam for String {
	fn from_param(raw: &str, _ctx: &BindContext) -> Result<Self, ConvertError> {
		Ok(raw.to_string())
	}
}

macro_rules! from_param_via_parse {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromParam for $ty {
				fn from_param(raw: &str, _ctx: &BindContext) -> Result<Self, ConvertError> {
					raw.parse::<$ty>().map_err(|_| ConvertError::TypeMismatch {
						raw: raw.to_string(),
						expected: stringify!($ty),
					})
				}
			}
		)*
	};
}

from_param_via_parse!(i32, i64, u32, u64, f64);

impl FromParam for bool {
	fn from_param(raw: &str, _ctx: &BindContext) -> Result<Self, ConvertError> {
		match raw {
			"true" | "1" | "on" => Ok(true),
			"false" | "0" | "off" => Ok(false),
			_ => Err(ConvertError::TypeMismatch {
				raw: raw.to_string(),
				expected: "bool",
			}),
		}
	}
}

impl FromParam for NaiveDate {
	fn from_param(raw: &str, ctx: &BindContext) -> Result<Self, ConvertError> {
		NaiveDate::parse_from_str(raw, ctx.date_format()).map_err(|_| ConvertError::MalformedDate {
			raw: raw.to_string(),
		})
	}
}

/// Absent binds as `None`; an empty value also binds as `None`, matching
/// how HTML forms submit untouched inputs.
impl<T: FromParam> FromParam for Option<T> {
	fn from_param(raw: &str, ctx: &BindContext) -> Result<Self, ConvertError> {
		if raw.is_empty() {
			Ok(None)
		} else {
			T::from_param(raw, ctx).map(Some)
		}
	}

	fn absent() -> Option<Self> {
		Some(None)
	}
}

/// Object-safe adapter over a [`FromParam`] impl.
pub(crate) trait ErasedConverter: Send + Sync {
	fn convert(
		&self,
		raw: &str,
		ctx: &BindContext,
	) -> Result<Arc<dyn Any + Send + Sync>, ConvertError>;

	fn absent(&self) -> Option<Arc<dyn Any + Send + Sync>>;
}

struct TypedConverter<T>(PhantomData<fn() -> T>);

impl<T: FromParam> ErasedConverter for TypedConverter<T> {
	fn convert(
		&self,
		raw: &str,
		ctx: &BindContext,
	) -> Result<Arc<dyn Any + Send + Sync>, ConvertError> {
		Ok(Arc::new(T::from_param(raw, ctx)?))
	}

	fn absent(&self) -> Option<Arc<dyn Any + Send + Sync>> {
		T::absent().map(|value| Arc::new(value) as Arc<dyn Any + Send + Sync>)
	}
}

/// Registry of converters, keyed by the target type's [`TypeId`].
///
/// Built once at startup and shared read-only across requests. Scalars and
/// records live in separate tables because they consume different inputs:
/// a scalar converts one raw value, a record binds field-by-field from the
/// whole parameter map.
///
/// # Examples
///
/// ```
/// use std::any::TypeId;
///
/// use grappelli_binding::ConverterRegistry;
///
/// let registry = ConverterRegistry::with_defaults();
/// assert!(registry.has_scalar(TypeId::of::<i32>()));
/// assert!(registry.has_scalar(TypeId::of::<chrono::NaiveDate>()));
/// assert!(!registry.has_scalar(TypeId::of::<char>()));
/// ```
pub struct ConverterRegistry {
	scalars: HashMap<TypeId, Arc<dyn ErasedConverter>>,
	records: HashMap<TypeId, Arc<dyn ErasedRecordBinder>>,
}

impl ConverterRegistry {
	/// An empty registry. Every type, including `String`, must be
	/// registered explicitly.
	pub fn new() -> Self {
		Self {
			scalars: HashMap::new(),
			records: HashMap::new(),
		}
	}

	/// A registry pre-loaded with the standard scalar set: `String`, the
	/// common integer widths, `f64`, `bool`, [`NaiveDate`], and `Option`
	/// of each.
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		registry.register::<String>();
		registry.register::<i32>();
		registry.register::<i64>();
		registry.register::<u32>();
		registry.register::<u64>();
		registry.register::<f64>();
		registry.register::<bool>();
		registry.register::<NaiveDate>();
		registry.register::<Option<String>>();
		registry.register::<Option<i32>>();
		registry.register::<Option<i64>>();
		registry.register::<Option<u32>>();
		registry.register::<Option<u64>>();
		registry.register::<Option<f64>>();
		registry.register::<Option<bool>>();
		registry.register::<Option<NaiveDate>>();
		registry
	}

	/// Register (or replace) the scalar converter for `T`.
	pub fn register<T: FromParam>(&mut self) {
		self.scalars
			.insert(TypeId::of::<T>(), Arc::new(TypedConverter::<T>(PhantomData)));
	}

	/// Register (or replace) the record binder for `T`.
	pub fn register_record<T: BindRecord>(&mut self) {
		self.records.insert(
			TypeId::of::<T>(),
			Arc::new(TypedRecordBinder::<T>(PhantomData)),
		);
	}

	pub fn has_scalar(&self, ty: TypeId) -> bool {
		self.scalars.contains_key(&ty)
	}

	pub fn has_record(&self, ty: TypeId) -> bool {
		self.records.contains_key(&ty)
	}

	pub(crate) fn scalar(&self, ty: TypeId) -> Option<&dyn ErasedConverter> {
		self.scalars.get(&ty).map(|converter| converter.as_ref())
	}

	pub(crate) fn record(&self, ty: TypeId) -> Option<&dyn ErasedRecordBinder> {
		self.records.get(&ty).map(|binder| binder.as_ref())
	}
}

impl Default for ConverterRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}
