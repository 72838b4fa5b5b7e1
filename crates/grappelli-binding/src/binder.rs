//! The binder: raw request data in, typed arguments out.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use grappelli_http::UploadedFile;

use crate::args::{BoundArguments, BoundValue};
use crate::convert::{BindContext, ConverterRegistry, ErasedConverter};
use crate::error::BindError;
use crate::spec::{ParamKind, ParamSource, ParamSpec};

/// The raw per-request inputs the binder draws from.
///
/// Assembled by the dispatcher from the parsed request; borrowing keeps the
/// binder independent of any transport type.
#[derive(Debug, Clone, Copy)]
pub struct BindInput<'a> {
	/// Variables extracted by route resolution.
	pub path_vars: &'a HashMap<String, String>,
	/// Merged query, form, and multipart text-field parameters.
	pub params: &'a HashMap<String, String>,
	/// Multipart file parts, keyed by part name. `None` when the request
	/// is not `multipart/form-data`.
	pub files: Option<&'a HashMap<String, UploadedFile>>,
	/// Raw request body.
	pub body: &'a Bytes,
}

/// Converts raw request data into typed [`BoundArguments`] by walking a
/// handler's parameter specs in order.
///
/// Binding is strict and all-or-nothing: the first failure aborts and the
/// handler never sees a partial argument set. The binder is immutable after
/// construction and shared across requests.
pub struct Binder {
	registry: Arc<ConverterRegistry>,
	context: BindContext,
}

impl Binder {
	pub fn new(registry: Arc<ConverterRegistry>) -> Self {
		Self {
			registry,
			context: BindContext::new(),
		}
	}

	/// Replace the process-wide date format used by date converters.
	pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
		self.context = self.context.with_date_format(format);
		self
	}

	pub fn context(&self) -> &BindContext {
		&self.context
	}

	pub fn registry(&self) -> &ConverterRegistry {
		&self.registry
	}

	/// Bind every parameter spec against the request input.
	pub fn bind(
		&self,
		input: &BindInput<'_>,
		specs: &[ParamSpec],
	) -> Result<BoundArguments, BindError> {
		let mut args = BoundArguments::new();
		for spec in specs {
			let value = self.bind_one(input, spec)?;
			args.insert(spec.name.clone(), value);
		}
		Ok(args)
	}

	fn bind_one(&self, input: &BindInput<'_>, spec: &ParamSpec) -> Result<BoundValue, BindError> {
		match spec.source {
			ParamSource::Path => self.bind_path(input, spec),
			ParamSource::Param => match spec.kind {
				ParamKind::Record => self.bind_record(input, spec),
				_ => self.bind_scalar(input, spec),
			},
			ParamSource::File => Self::bind_file(input, spec),
			ParamSource::Body => Ok(BoundValue::Body(input.body.clone())),
		}
	}

	fn bind_path(&self, input: &BindInput<'_>, spec: &ParamSpec) -> Result<BoundValue, BindError> {
		let converter = self.scalar_converter(spec)?;
		let Some(raw) = input.path_vars.get(&spec.name) else {
			return Err(BindError::PathVariableMissing {
				name: spec.name.clone(),
			});
		};
		converter
			.convert(raw, &self.context)
			.map(BoundValue::Value)
			.map_err(|err| err.into_bind_error(&spec.name))
	}

	fn bind_scalar(&self, input: &BindInput<'_>, spec: &ParamSpec) -> Result<BoundValue, BindError> {
		let converter = self.scalar_converter(spec)?;
		match input.params.get(&spec.name) {
			Some(raw) => converter
				.convert(raw, &self.context)
				.map(BoundValue::Value)
				.map_err(|err| err.into_bind_error(&spec.name)),
			None => converter
				.absent()
				.map(BoundValue::Value)
				.ok_or_else(|| BindError::MissingParameter {
					name: spec.name.clone(),
				}),
		}
	}

	fn bind_record(&self, input: &BindInput<'_>, spec: &ParamSpec) -> Result<BoundValue, BindError> {
		let binder = spec
			.type_id
			.and_then(|ty| self.registry.record(ty))
			.ok_or(BindError::UnsupportedType {
				ty: spec.type_name,
			})?;
		binder
			.bind(input.params, &self.context)
			.map(BoundValue::Value)
	}

	fn bind_file(input: &BindInput<'_>, spec: &ParamSpec) -> Result<BoundValue, BindError> {
		let Some(files) = input.files else {
			return Err(BindError::NotMultipart);
		};
		let Some(file) = files.get(&spec.name) else {
			return Err(BindError::MissingParameter {
				name: spec.name.clone(),
			});
		};
		Ok(BoundValue::File(file.clone()))
	}

	fn scalar_converter(&self, spec: &ParamSpec) -> Result<&dyn ErasedConverter, BindError> {
		spec.type_id
			.and_then(|ty| self.registry.scalar(ty))
			.ok_or(BindError::UnsupportedType {
				ty: spec.type_name,
			})
	}
}
