//! `multipart/form-data` body parsing.
//!
//! The framework materializes request bodies fully before dispatch, so the
//! parser works on a complete byte buffer: text parts land in
//! [`MultipartForm::fields`], file parts (any part carrying a `filename`)
//! land in [`MultipartForm::files`] as [`UploadedFile`]s backed by cheap
//! slices of the request body.

use bytes::Bytes;
use std::collections::HashMap;

use crate::upload::UploadedFile;
use crate::{Error, Result};

const CRLF: &[u8] = b"\r\n";
const HEADER_END: &[u8] = b"\r\n\r\n";

/// A parsed `multipart/form-data` body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
	/// Text parts, keyed by their form field name.
	pub fields: HashMap<String, String>,
	/// File parts, keyed by their form field name.
	pub files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
	/// Parse a multipart body against the boundary announced in the
	/// request's Content-Type header.
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use grappelli_http::MultipartForm;
	///
	/// let body = Bytes::from(
	///     "--xyz\r\n\
	///      Content-Disposition: form-data; name=\"name\"\r\n\r\n\
	///      jay\r\n\
	///      --xyz--\r\n",
	/// );
	///
	/// let form = MultipartForm::parse(&body, "xyz").unwrap();
	/// assert_eq!(form.fields.get("name"), Some(&"jay".to_string()));
	/// ```
	pub fn parse(body: &Bytes, boundary: &str) -> Result<Self> {
		if boundary.is_empty() {
			return Err(Error::BadRequest("empty multipart boundary".to_string()));
		}
		let delimiter = format!("--{}", boundary).into_bytes();
		let mut form = MultipartForm::default();

		let mut cursor = find_subsequence(body, &delimiter, 0)
			.ok_or_else(|| Error::BadRequest("multipart body without boundary".to_string()))?
			+ delimiter.len();

		loop {
			if body[cursor..].starts_with(b"--") {
				// Closing delimiter, anything after it is epilogue.
				return Ok(form);
			}
			if !body[cursor..].starts_with(CRLF) {
				return Err(Error::BadRequest(
					"malformed multipart boundary line".to_string(),
				));
			}
			cursor += CRLF.len();

			let headers_end = find_subsequence(body, HEADER_END, cursor).ok_or_else(|| {
				Error::BadRequest("multipart part without header terminator".to_string())
			})?;
			let headers = parse_part_headers(&body[cursor..headers_end])?;
			let content_start = headers_end + HEADER_END.len();

			// Part content runs until the CRLF that precedes the next delimiter.
			let mut closing = Vec::with_capacity(CRLF.len() + delimiter.len());
			closing.extend_from_slice(CRLF);
			closing.extend_from_slice(&delimiter);
			let content_end = find_subsequence(body, &closing, content_start)
				.ok_or_else(|| Error::BadRequest("unterminated multipart part".to_string()))?;

			let content = body.slice(content_start..content_end);
			match headers.filename {
				Some(filename) => {
					form.files.insert(
						headers.name.clone(),
						UploadedFile::new(headers.name, filename, headers.content_type, content),
					);
				}
				None => {
					form.fields.insert(
						headers.name,
						String::from_utf8_lossy(&content).to_string(),
					);
				}
			}

			cursor = content_end + closing.len();
		}
	}
}

struct PartHeaders {
	name: String,
	filename: Option<String>,
	content_type: Option<String>,
}

fn parse_part_headers(block: &[u8]) -> Result<PartHeaders> {
	let text = String::from_utf8_lossy(block);
	let mut disposition: Option<String> = None;
	let mut content_type: Option<String> = None;

	for line in text.split("\r\n") {
		let Some((header_name, value)) = line.split_once(':') else {
			continue;
		};
		match header_name.trim().to_ascii_lowercase().as_str() {
			"content-disposition" => disposition = Some(value.trim().to_string()),
			"content-type" => content_type = Some(value.trim().to_string()),
			_ => {}
		}
	}

	let disposition = disposition.ok_or_else(|| {
		Error::BadRequest("multipart part without content-disposition".to_string())
	})?;
	let name = disposition_param(&disposition, "name").ok_or_else(|| {
		Error::BadRequest("multipart part without a field name".to_string())
	})?;
	let filename = disposition_param(&disposition, "filename");

	Ok(PartHeaders {
		name,
		filename,
		content_type,
	})
}

/// Extract a `key="value"` (or bare `key=value`) parameter from a
/// Content-Disposition header value.
fn disposition_param(disposition: &str, key: &str) -> Option<String> {
	disposition.split(';').skip(1).find_map(|param| {
		let (param_key, param_value) = param.trim().split_once('=')?;
		if !param_key.trim().eq_ignore_ascii_case(key) {
			return None;
		}
		Some(param_value.trim().trim_matches('"').to_string())
	})
}

/// Pull the boundary parameter out of a Content-Type header value.
pub fn boundary_from_content_type(header: &str) -> Option<String> {
	header.split(';').skip(1).find_map(|param| {
		let (key, value) = param.trim().split_once('=')?;
		if !key.trim().eq_ignore_ascii_case("boundary") {
			return None;
		}
		let value = value.trim().trim_matches('"');
		if value.is_empty() {
			None
		} else {
			Some(value.to_string())
		}
	})
}

fn find_subsequence(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
	if from >= haystack.len() {
		return None;
	}
	haystack[from..]
		.windows(needle.len())
		.position(|window| window == needle)
		.map(|pos| pos + from)
}
