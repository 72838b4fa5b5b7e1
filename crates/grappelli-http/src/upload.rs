//! Uploaded file representation and filesystem persistence.
//!
//! Upload bytes are fully materialized in memory during request
//! processing; persisting them is a separate, explicit step through
//! [`UploadStore`].

use bytes::Bytes;
use chrono::Utc;
use percent_encoding::percent_decode_str;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

const DEFAULT_MAX_SIZE: usize = 10 * 1024 * 1024;

/// A file received in a `multipart/form-data` request.
///
/// Lives only for the duration of request processing; the bytes are a
/// slice of the request body, so cloning is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
	/// Form field name the file arrived under.
	pub name: String,
	/// Client-supplied file name, untrusted.
	pub original_name: String,
	/// Content-Type announced for the part, if any.
	pub content_type: Option<String>,
	pub bytes: Bytes,
}

impl UploadedFile {
	pub fn new(
		name: impl Into<String>,
		original_name: impl Into<String>,
		content_type: Option<String>,
		bytes: Bytes,
	) -> Self {
		Self {
			name: name.into(),
			original_name: original_name.into(),
			content_type,
			bytes,
		}
	}

	/// Extension of the client-supplied name, including the dot.
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use grappelli_http::UploadedFile;
	///
	/// let file = UploadedFile::new("file", "report.pdf", None, Bytes::new());
	/// assert_eq!(file.extension(), Some(".pdf"));
	///
	/// let bare = UploadedFile::new("file", "README", None, Bytes::new());
	/// assert_eq!(bare.extension(), None);
	/// ```
	pub fn extension(&self) -> Option<&str> {
		self.original_name
			.rfind('.')
			.map(|idx| &self.original_name[idx..])
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}
}

/// Validate that a client-supplied filename cannot escape the upload
/// directory.
///
/// Checks both the raw name and its URL-decoded form so percent-encoded
/// traversal sequences like `%2e%2e%2f` are caught as well.
pub fn validate_safe_filename(filename: &str) -> Result<()> {
	if filename.is_empty() {
		return Err(Error::BadRequest("empty upload filename".to_string()));
	}

	let decoded = percent_decode_str(filename).decode_utf8_lossy();
	for candidate in [filename, decoded.as_ref()] {
		if candidate.contains('\0')
			|| candidate.contains("..")
			|| candidate.contains('/')
			|| candidate.contains('\\')
		{
			return Err(Error::BadRequest(format!(
				"unsafe upload filename: {}",
				filename
			)));
		}
		// Windows drive letters (C:...) would also escape the directory.
		if candidate.len() >= 2
			&& candidate.as_bytes()[0].is_ascii_alphabetic()
			&& candidate.as_bytes()[1] == b':'
		{
			return Err(Error::BadRequest(format!(
				"unsafe upload filename: {}",
				filename
			)));
		}
	}
	Ok(())
}

/// Persists uploaded files under a directory, naming each file by its
/// UTC arrival timestamp (`%Y%m%d%H%M%S`) plus the original extension.
///
/// Two uploads landing within the same second under the same extension
/// overwrite each other; callers that need stronger names should rename
/// after storing.
pub struct UploadStore {
	dir: PathBuf,
	max_size: usize,
}

impl UploadStore {
	/// Create a store writing into `dir`.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::UploadStore;
	///
	/// let store = UploadStore::new("upload");
	/// assert_eq!(store.max_size(), 10 * 1024 * 1024); // 10 MiB default
	/// ```
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: dir.into(),
			max_size: DEFAULT_MAX_SIZE,
		}
	}

	/// Set maximum accepted file size
	pub fn with_max_size(mut self, max_size: usize) -> Self {
		self.max_size = max_size;
		self
	}

	pub fn max_size(&self) -> usize {
		self.max_size
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Write the file to disk and return the path it was stored under.
	///
	/// The upload directory is created on first use. Fails when the file
	/// exceeds the size limit or its original name is unsafe.
	pub fn store(&self, file: &UploadedFile) -> Result<PathBuf> {
		if file.len() > self.max_size {
			return Err(Error::PayloadTooLarge(format!(
				"{} is {} bytes (max {})",
				file.original_name,
				file.len(),
				self.max_size
			)));
		}
		validate_safe_filename(&file.original_name)?;

		fs::create_dir_all(&self.dir)?;

		let stamp = Utc::now().format("%Y%m%d%H%M%S");
		let stored_name = match file.extension() {
			Some(ext) => format!("{}{}", stamp, ext),
			None => stamp.to_string(),
		};
		let path = self.dir.join(stored_name);
		fs::write(&path, &file.bytes)?;
		tracing::debug!("stored upload {} as {}", file.original_name, path.display());
		Ok(path)
	}
}
