//! Framework settings: defaults, environment overrides, and file-based
//! deserialization.

use std::path::PathBuf;

use serde::Deserialize;

/// Default date format for parameter binding.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default directory uploaded files are persisted under.
pub const DEFAULT_UPLOAD_DIR: &str = "upload";

/// Default per-file upload size limit: 10 MiB.
pub const DEFAULT_UPLOAD_MAX_SIZE: usize = 10 * 1024 * 1024;

/// Environment variable overriding [`Settings::date_format`].
pub const ENV_DATE_FORMAT: &str = "GRAPPELLI_DATE_FORMAT";

/// Environment variable overriding [`UploadSettings::dir`].
pub const ENV_UPLOAD_DIR: &str = "GRAPPELLI_UPLOAD_DIR";

/// Environment variable overriding [`UploadSettings::max_size`].
pub const ENV_UPLOAD_MAX_SIZE: &str = "GRAPPELLI_UPLOAD_MAX_SIZE";

/// Process-wide framework settings.
///
/// Every field has a default, so partial configuration files and sparse
/// environments both work. Settings are read once at startup and handed to
/// the components that consume them (the binder takes the date format, the
/// upload store takes the upload settings).
///
/// # Examples
///
/// ```
/// use grappelli_conf::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.date_format, "%Y-%m-%d");
/// assert_eq!(settings.upload.max_size, 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// strftime format used by the date converters.
	pub date_format: String,
	pub upload: UploadSettings,
}

/// Upload persistence settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
	/// Directory uploaded files are written to.
	pub dir: PathBuf,
	/// Per-file size limit in bytes.
	pub max_size: usize,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			date_format: DEFAULT_DATE_FORMAT.to_string(),
			upload: UploadSettings::default(),
		}
	}
}

impl Default for UploadSettings {
	fn default() -> Self {
		Self {
			dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
			max_size: DEFAULT_UPLOAD_MAX_SIZE,
		}
	}
}

/// Failure applying configuration overrides.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("invalid value for {key}: `{value}`")]
	Invalid { key: &'static str, value: String },
}

impl Settings {
	/// Defaults overridden by `GRAPPELLI_*` environment variables.
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Defaults overridden through an arbitrary lookup function.
	///
	/// [`Settings::from_env`] is this with [`std::env::var`]; tests pass a
	/// map instead of mutating the process environment.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
		let mut settings = Self::default();
		if let Some(format) = lookup(ENV_DATE_FORMAT) {
			settings.date_format = format;
		}
		if let Some(dir) = lookup(ENV_UPLOAD_DIR) {
			settings.upload.dir = PathBuf::from(dir);
		}
		if let Some(size) = lookup(ENV_UPLOAD_MAX_SIZE) {
			settings.upload.max_size = size.parse().map_err(|_| SettingsError::Invalid {
				key: ENV_UPLOAD_MAX_SIZE,
				value: size,
			})?;
		}
		Ok(settings)
	}
}
