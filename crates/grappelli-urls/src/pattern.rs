use percent_encoding::percent_decode_str;
use std::collections::HashMap;

use crate::RouteError;

/// One segment of a parsed pattern: either literal text that must match
/// exactly, or a `{name}` variable capturing whatever the path carries
/// in that position.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Variable(String),
}

/// A URL path pattern with `{name}` variable segments.
///
/// Both the pattern and every matched path are normalized by stripping
/// trailing slashes (the root path `/` stays as-is) before comparison, so
/// `/user/{id}` matches `/user/42` and `/user/42/` alike.
///
/// # Examples
///
/// ```
/// use grappelli_urls::PathPattern;
///
/// let pattern = PathPattern::parse("/user/{id}").unwrap();
///
/// let vars = pattern.matches("/user/42").unwrap();
/// assert_eq!(vars.get("id"), Some(&"42".to_string()));
///
/// assert!(pattern.matches("/user").is_none());
/// assert!(pattern.matches("/user/42/extra").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	raw: String,
	segments: Vec<Segment>,
}

impl PathPattern {
	/// Parse a pattern string.
	///
	/// Patterns must start with `/`. A variable spans a whole segment
	/// (`/user/{id}`); braces anywhere else are rejected, as are empty or
	/// repeated variable names.
	pub fn parse(pattern: &str) -> Result<Self, RouteError> {
		let invalid = |reason: &str| RouteError::InvalidPattern {
			pattern: pattern.to_string(),
			reason: reason.to_string(),
		};

		if !pattern.starts_with('/') {
			return Err(invalid("must start with '/'"));
		}

		let normalized = normalize(pattern);
		let mut segments = Vec::new();
		let mut seen_names: Vec<&str> = Vec::new();

		if normalized != "/" {
			for part in normalized.split('/').skip(1) {
				if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
					if name.is_empty() {
						return Err(invalid("empty variable name"));
					}
					if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
						return Err(invalid("variable names may only use [A-Za-z0-9_]"));
					}
					if seen_names.contains(&name) {
						return Err(invalid("variable name used twice"));
					}
					seen_names.push(name);
					segments.push(Segment::Variable(name.to_string()));
				} else if part.contains('{') || part.contains('}') {
					return Err(invalid("braces must span a whole segment"));
				} else {
					segments.push(Segment::Literal(part.to_string()));
				}
			}
		}

		Ok(Self {
			raw: pattern.to_string(),
			segments,
		})
	}

	/// Match a request path, extracting variable captures.
	///
	/// Path segments are percent-decoded before comparison and capture.
	/// Returns `None` when the path does not match.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let normalized = normalize(path);
		let rest = normalized.strip_prefix('/')?;

		let path_segments: Vec<&str> = if rest.is_empty() {
			Vec::new()
		} else {
			rest.split('/').collect()
		};
		if path_segments.len() != self.segments.len() {
			return None;
		}

		let mut vars = HashMap::new();
		for (segment, part) in self.segments.iter().zip(path_segments) {
			let decoded = percent_decode_str(part).decode_utf8_lossy();
			match segment {
				Segment::Literal(literal) => {
					if decoded != *literal {
						return None;
					}
				}
				Segment::Variable(name) => {
					vars.insert(name.clone(), decoded.into_owned());
				}
			}
		}
		Some(vars)
	}

	/// The pattern string as registered.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Whether two patterns would match the same set of paths: literals
	/// equal position by position, variables interchangeable regardless
	/// of their names.
	pub(crate) fn same_shape(&self, other: &Self) -> bool {
		self.segments.len() == other.segments.len()
			&& self
				.segments
				.iter()
				.zip(&other.segments)
				.all(|(a, b)| match (a, b) {
					(Segment::Literal(x), Segment::Literal(y)) => x == y,
					(Segment::Variable(_), Segment::Variable(_)) => true,
					_ => false,
				})
	}
}

/// Strip trailing slashes, keeping the root path intact.
pub(crate) fn normalize(path: &str) -> &str {
	let trimmed = path.trim_end_matches('/');
	if trimmed.is_empty() { "/" } else { trimmed }
}
