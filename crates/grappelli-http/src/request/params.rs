use super::Request;
use hyper::Uri;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Decode one urlencoded component: `+` means space, then percent-decode.
pub(crate) fn decode_component(raw: &str) -> String {
	let plus_decoded = raw.replace('+', " ");
	percent_decode_str(&plus_decoded)
		.decode_utf8_lossy()
		.to_string()
}

/// Parse a `key=value&key=value` body or query string into a map,
/// splitting each pair on the first `=` only so values may contain `=`.
pub(crate) fn parse_urlencoded(input: &str) -> HashMap<String, String> {
	input
		.split('&')
		.filter(|pair| !pair.is_empty())
		.filter_map(|pair| {
			let mut parts = pair.splitn(2, '=');
			Some((
				parts.next()?.to_string(),
				parts.next().unwrap_or("").to_string(),
			))
		})
		.collect()
}

impl Request {
	/// Parse query parameters from URI, values kept exactly as sent.
	pub(super) fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query().map(parse_urlencoded).unwrap_or_default()
	}

	/// Get URL-decoded query parameters
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/greet?name=John%20Doe")
	///     .build()
	///     .unwrap();
	///
	/// let decoded = request.decoded_query_params();
	/// assert_eq!(decoded.get("name"), Some(&"John Doe".to_string()));
	/// ```
	pub fn decoded_query_params(&self) -> HashMap<String, String> {
		self.query_params
			.iter()
			.map(|(k, v)| (decode_component(k), decode_component(v)))
			.collect()
	}

	/// Parameters from an `application/x-www-form-urlencoded` body, decoded.
	///
	/// Empty for any other content type.
	pub fn form_params(&self) -> HashMap<String, String> {
		if !self.is_form_urlencoded() {
			return HashMap::new();
		}
		let body = String::from_utf8_lossy(&self.body);
		parse_urlencoded(&body)
			.into_iter()
			.map(|(k, v)| (decode_component(&k), decode_component(&v)))
			.collect()
	}

	/// Merged, decoded view of query and form parameters.
	///
	/// Query parameters are inserted first, then form parameters, so a
	/// form value overwrites a query value under the same name.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::POST)
	///     .uri("/person?name=jay")
	///     .header("content-type", "application/x-www-form-urlencoded")
	///     .body("age=20")
	///     .build()
	///     .unwrap();
	///
	/// let params = request.parameter_map();
	/// assert_eq!(params.get("name"), Some(&"jay".to_string()));
	/// assert_eq!(params.get("age"), Some(&"20".to_string()));
	/// ```
	pub fn parameter_map(&self) -> HashMap<String, String> {
		let mut params = self.decoded_query_params();
		params.extend(self.form_params());
		params
	}

	/// Set a path parameter (used by routers for path variable extraction)
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::Method;
	///
	/// let mut request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/users/123")
	///     .build()
	///     .unwrap();
	///
	/// request.set_path_param("id", "123");
	/// assert_eq!(request.path_params.get("id"), Some(&"123".to_string()));
	/// ```
	pub fn set_path_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.path_params.insert(key.into(), value.into());
	}
}
