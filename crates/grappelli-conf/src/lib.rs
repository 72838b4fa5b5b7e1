//! # Grappelli Conf
//!
//! Settings for the Grappelli framework: the date format used by parameter
//! binding and the upload directory and size limit used by the upload
//! store. Defaults work out of the box; `GRAPPELLI_*` environment variables
//! or a deserialized config file override them.

pub mod settings;

pub use settings::{
	Settings, SettingsError, UploadSettings, DEFAULT_DATE_FORMAT, DEFAULT_UPLOAD_DIR,
	DEFAULT_UPLOAD_MAX_SIZE, ENV_DATE_FORMAT, ENV_UPLOAD_DIR, ENV_UPLOAD_MAX_SIZE,
};
