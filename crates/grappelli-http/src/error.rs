/// HTTP-level error type shared across the framework crates.
///
/// Every variant maps to an HTTP status code via [`Error::status_code`];
/// the transport layer uses that mapping when it has to answer with an
/// error it cannot recover from.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The request was syntactically or semantically invalid.
	#[error("bad request: {0}")]
	BadRequest(String),

	/// The requested resource does not exist.
	#[error("not found: {0}")]
	NotFound(String),

	/// The request body exceeded a configured size limit.
	#[error("payload too large: {0}")]
	PayloadTooLarge(String),

	/// Serializing a response body failed.
	#[error("serialization error: {0}")]
	Serialization(String),

	/// Any other failure internal to the framework.
	#[error("internal error: {0}")]
	Internal(String),
}

impl Error {
	/// HTTP status code for this error.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Error;
	///
	/// assert_eq!(Error::BadRequest("oops".into()).status_code(), 400);
	/// assert_eq!(Error::NotFound("gone".into()).status_code(), 404);
	/// assert_eq!(Error::Internal("boom".into()).status_code(), 500);
	/// ```
	pub fn status_code(&self) -> u16 {
		match self {
			Error::BadRequest(_) => 400,
			Error::NotFound(_) => 404,
			Error::PayloadTooLarge(_) => 413,
			Error::Serialization(_) => 500,
			Error::Internal(_) => 500,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Error::Internal(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, Error>;
