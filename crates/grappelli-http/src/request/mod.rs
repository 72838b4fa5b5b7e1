mod params;

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};
use std::collections::HashMap;
use std::net::SocketAddr;

use crate::multipart::MultipartForm;
use crate::{Error, Result};

/// HTTP request representation.
///
/// Carries the raw transport data plus the two parameter maps the
/// framework fills in while processing: `query_params` (parsed from the
/// URI, values kept as sent) and `path_params` (set by the router when a
/// pattern with `{name}` segments matched).
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub query_params: HashMap<String, String>,
	pub path_params: HashMap<String, String>,
	pub remote_addr: Option<SocketAddr>,
}

impl Request {
	/// Create a new Request from its transport parts.
	///
	/// Query parameters are parsed from the URI immediately; path
	/// parameters start empty and are filled by the router.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::{Method, Uri, Version, HeaderMap};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/greet?name=jay"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	///
	/// assert_eq!(request.path(), "/greet");
	/// assert_eq!(request.query_params.get("name"), Some(&"jay".to_string()));
	/// ```
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		let query_params = Self::parse_query_params(&uri);
		Self {
			method,
			uri,
			version,
			headers,
			body,
			query_params,
			path_params: HashMap::new(),
			remote_addr: None,
		}
	}

	/// Start building a Request.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/users/42")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.path(), "/users/42");
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::new()
	}

	/// Attach the peer address the request arrived from.
	pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
		self.remote_addr = Some(addr);
		self
	}

	/// Get the request path
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Content-Type header value without its parameters.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::{Method, HeaderMap};
	///
	/// let mut headers = HeaderMap::new();
	/// headers.insert("content-type", "multipart/form-data; boundary=xyz".parse().unwrap());
	///
	/// let request = Request::builder()
	///     .method(Method::POST)
	///     .uri("/upload")
	///     .headers(headers)
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.content_type(), Some("multipart/form-data"));
	/// ```
	pub fn content_type(&self) -> Option<&str> {
		self.headers
			.get(hyper::header::CONTENT_TYPE)
			.and_then(|h| h.to_str().ok())
			.map(|v| v.split(';').next().unwrap_or(v).trim())
	}

	/// Whether the request carries a `multipart/form-data` body.
	pub fn is_multipart(&self) -> bool {
		self.content_type()
			.is_some_and(|ct| ct.eq_ignore_ascii_case("multipart/form-data"))
	}

	/// Whether the request carries an `application/x-www-form-urlencoded` body.
	pub fn is_form_urlencoded(&self) -> bool {
		self.content_type()
			.is_some_and(|ct| ct.eq_ignore_ascii_case("application/x-www-form-urlencoded"))
	}

	/// Parse the multipart body, if the request has one.
	///
	/// Returns `Ok(None)` for non-multipart requests. A multipart
	/// Content-Type without a usable boundary, or a body that does not
	/// follow the multipart framing, is a bad request.
	pub fn multipart_form(&self) -> Result<Option<MultipartForm>> {
		if !self.is_multipart() {
			return Ok(None);
		}
		let boundary = self
			.headers
			.get(hyper::header::CONTENT_TYPE)
			.and_then(|h| h.to_str().ok())
			.and_then(crate::multipart::boundary_from_content_type)
			.ok_or_else(|| {
				Error::BadRequest("multipart request without boundary parameter".to_string())
			})?;
		MultipartForm::parse(&self.body, &boundary).map(Some)
	}
}

/// Builder for [`Request`].
///
/// `uri` accepts a string and is parsed at [`RequestBuilder::build`] time,
/// which is why building returns a `Result`.
pub struct RequestBuilder {
	method: Method,
	uri: String,
	version: Version,
	headers: HeaderMap,
	body: Bytes,
	remote_addr: Option<SocketAddr>,
}

impl RequestBuilder {
	fn new() -> Self {
		Self {
			method: Method::GET,
			uri: "/".to_string(),
			version: Version::HTTP_11,
			headers: HeaderMap::new(),
			body: Bytes::new(),
			remote_addr: None,
		}
	}

	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = version;
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	/// Insert a single header, keeping any set earlier.
	pub fn header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = hyper::header::HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = hyper::header::HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn remote_addr(mut self, addr: SocketAddr) -> Self {
		self.remote_addr = Some(addr);
		self
	}

	pub fn build(self) -> Result<Request> {
		let uri: Uri = self
			.uri
			.parse()
			.map_err(|e| Error::BadRequest(format!("invalid uri {}: {}", self.uri, e)))?;
		let mut request = Request::new(self.method, uri, self.version, self.headers, self.body);
		request.remote_addr = self.remote_addr;
		Ok(request)
	}
}
