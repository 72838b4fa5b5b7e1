//! Field-by-field record binding ("auto-boxing").
//!
//! A record type gathers several request parameters into one struct: each
//! field resolves independently from the same-named parameter. Absent
//! fields take their zero value instead of failing, which is what makes
//! records suitable for loosely-filled HTML forms.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::convert::{BindContext, FromParam};
use crate::error::BindError;

/// A struct bindable field-by-field from the request parameter map.
///
/// Implementations list their fields with [`field`]; registration in a
/// [`ConverterRegistry`](crate::ConverterRegistry) via
/// [`register_record`](crate::ConverterRegistry::register_record) makes the
/// type available to `ParamSpec::record`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use grappelli_binding::{field, BindContext, BindError, BindRecord};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person {
///     name: String,
///     age: f64,
/// }
///
/// impl BindRecord for Person {
///     fn bind_fields(
///         params: &HashMap<String, String>,
///         ctx: &BindContext,
///     ) -> Result<Self, BindError> {
///         Ok(Person {
///             name: field(params, "name", ctx)?,
///             age: field(params, "age", ctx)?,
///         })
///     }
/// }
///
/// let mut params = HashMap::new();
/// params.insert("name".to_string(), "jay".to_string());
///
/// let person = Person::bind_fields(&params, &BindContext::new()).unwrap();
/// assert_eq!(person, Person { name: "jay".to_string(), age: 0.0 });
/// ```
pub trait BindRecord: Sized + Send + Sync + 'static {
	fn bind_fields(
		params: &HashMap<String, String>,
		ctx: &BindContext,
	) -> Result<Self, BindError>;
}

/// Resolve one record field from the parameter map.
///
/// An absent or empty-valued parameter yields `T::default()` — the zero
/// value — never an error. A present, non-empty value converts strictly:
/// a conversion failure aborts the whole record bind.
pub fn field<T>(
	params: &HashMap<String, String>,
	name: &str,
	ctx: &BindContext,
) -> Result<T, BindError>
where
	T: FromParam + Default,
{
	match params.get(name) {
		None => Ok(T::default()),
		Some(raw) if raw.is_empty() => Ok(T::default()),
		Some(raw) => T::from_param(raw, ctx).map_err(|err| err.into_bind_error(name)),
	}
}

/// Object-safe adapter over a [`BindRecord`] impl.
pub(crate) trait ErasedRecordBinder: Send + Sync {
	fn bind(
		&self,
		params: &HashMap<String, String>,
		ctx: &BindContext,
	) -> Result<Arc<dyn Any + Send + Sync>, BindError>;
}

pub(crate) struct TypedRecordBinder<T>(pub(crate) PhantomData<fn() -> T>);

impl<T: BindRecord> ErasedRecordBinder for TypedRecordBinder<T> {
	fn bind(
		&self,
		params: &HashMap<String, String>,
		ctx: &BindContext,
	) -> Result<Arc<dyn Any + Send + Sync>, BindError> {
		Ok(Arc::new(T::bind_fields(params, ctx)?))
	}
}
