//! Integration test utilities for Grappelli.
//!
//! Shared fixtures for the integration suites: bindable record types and
//! a dispatcher wired with the full demo tour, driven directly (no
//! sockets involved).

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use chrono::NaiveDate;
use grappelli::prelude::*;
use hyper::Method;

/// The tour's record type: bound as a whole from the parameter map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
	pub name: String,
	pub age: f64,
	pub birth: Option<NaiveDate>,
}

impl BindRecord for Person {
	fn bind_fields(
		params: &HashMap<String, String>,
		ctx: &BindContext,
	) -> Result<Self, BindError> {
		Ok(Self {
			name: field(params, "name", ctx)?,
			age: field(params, "age", ctx)?,
			birth: field(params, "birth", ctx)?,
		})
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
	pub id: i64,
	pub name: String,
	pub birth: Option<NaiveDate>,
}

/// The `mvc` controller of the demo tour, minus the upload route (tests
/// that need uploads wire their own store against a temp directory).
pub fn mvc_controller() -> Controller {
	Controller::new("mvc")
		.route(
			RouteMethod::Get,
			"/mvc/hello",
			vec![],
			handler_fn(|_args| async { Ok(Outcome::view("hello")) }),
		)
		.route(
			RouteMethod::Get,
			"/mvc/person",
			vec![
				ParamSpec::param::<String>("name"),
				ParamSpec::param::<Option<f64>>("age"),
			],
			handler_fn(|args| async move {
				let name: &String = args.get("name")?;
				let age: &Option<f64> = args.get("age")?;
				Ok(Outcome::view("person")
					.with_data("name", name.clone())
					.with_data("age", *age))
			}),
		)
		.route(
			RouteMethod::Get,
			"/mvc/person1",
			vec![ParamSpec::record::<Person>("person")],
			handler_fn(|args| async move {
				let person: &Person = args.get("person")?;
				Ok(Outcome::view("person").with_data("person", serde_json::to_value(person)?))
			}),
		)
		.route(
			RouteMethod::Get,
			"/mvc/date",
			vec![ParamSpec::param::<NaiveDate>("date")],
			handler_fn(|args| async move {
				let date: &NaiveDate = args.get("date")?;
				Ok(Outcome::view("date").with_data("date", date.to_string()))
			}),
		)
		.route(
			RouteMethod::Get,
			"/mvc/show",
			vec![],
			handler_fn(|_args| async {
				let person = Person {
					name: "jay".to_string(),
					age: 20.0,
					birth: None,
				};
				Ok(Outcome::view("show").with_data("p", serde_json::to_value(&person)?))
			}),
		)
		.route(
			RouteMethod::Get,
			"/mvc/redirect",
			vec![],
			handler_fn(|_args| async { Ok(Outcome::from_view_string("redirect:hello")) }),
		)
		.route(
			RouteMethod::Get,
			"/mvc/param",
			vec![
				ParamSpec::param::<i64>("id"),
				ParamSpec::param::<String>("name"),
			],
			handler_fn(|args| async move {
				let id: &i64 = args.get("id")?;
				let name: &String = args.get("name")?;
				Ok(Outcome::view("param")
					.with_data("id", *id)
					.with_data("name", name.clone()))
			}),
		)
		.route(
			RouteMethod::Get,
			"/mvc/user",
			vec![],
			handler_fn(|_args| async {
				let user = User {
					id: 1,
					name: "jay".to_string(),
					birth: NaiveDate::from_ymd_opt(1990, 1, 1),
				};
				Ok(Outcome::json(serde_json::to_value(&user)?))
			}),
		)
		.route(
			RouteMethod::Get,
			"/mvc/error",
			vec![],
			handler_fn(|_args| async { Err(DispatchError::handler("deliberate failure")) }),
		)
		.on_error(ErrorMatch::Any, |err| {
			Outcome::view("error").with_data("exception", err.to_string())
		})
}

/// The `rest` controller: one pattern, four verbs.
pub fn rest_controller() -> Controller {
	let mut controller = Controller::new("rest");
	for method in [
		RouteMethod::Get,
		RouteMethod::Post,
		RouteMethod::Put,
		RouteMethod::Delete,
	] {
		controller = controller.route(
			method,
			"/rest/user/{id}",
			vec![ParamSpec::path::<i64>("id")],
			handler_fn(|_args| async { Ok(Outcome::view("hello")) }),
		);
	}
	controller
}

/// Builder carrying the whole tour; tests add interceptors before `build`.
pub fn tour_builder() -> grappelli::DispatcherBuilder {
	let mut registry = grappelli::ConverterRegistry::with_defaults();
	registry.register_record::<Person>();
	Dispatcher::builder()
		.registry(registry)
		.controller(mvc_controller())
		.controller(rest_controller())
		.exception_handler(ErrorMatch::Any, |err| {
			Outcome::view("error").with_data("exception", err.to_string())
		})
}

pub fn tour_dispatcher() -> Dispatcher {
	tour_builder().build().expect("tour routes are unique")
}

pub fn get(uri: &str) -> Request {
	Request::builder()
		.method(Method::GET)
		.uri(uri)
		.build()
		.expect("valid test request")
}

pub fn request(method: Method, uri: &str) -> Request {
	Request::builder()
		.method(method)
		.uri(uri)
		.build()
		.expect("valid test request")
}

pub fn post_form(uri: &str, body: &str) -> Request {
	Request::builder()
		.method(Method::POST)
		.uri(uri)
		.header("content-type", "application/x-www-form-urlencoded")
		.body(body.to_string())
		.build()
		.expect("valid test request")
}

/// Assemble a `multipart/form-data` body from text fields and
/// `(field, filename, content)` file parts.
pub fn multipart_request(
	uri: &str,
	boundary: &str,
	fields: &[(&str, &str)],
	files: &[(&str, &str, &str)],
) -> Request {
	let mut body = Vec::new();
	for (name, value) in fields {
		body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
		body.extend_from_slice(
			format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
		);
		body.extend_from_slice(value.as_bytes());
		body.extend_from_slice(b"\r\n");
	}
	for (name, filename, content) in files {
		body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
		body.extend_from_slice(
			format!(
				"Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
				name, filename
			)
			.as_bytes(),
		);
		body.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
		body.extend_from_slice(content.as_bytes());
		body.extend_from_slice(b"\r\n");
	}
	body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

	Request::builder()
		.method(Method::POST)
		.uri(uri)
		.header(
			"content-type",
			&format!("multipart/form-data; boundary={}", boundary),
		)
		.body(body)
		.build()
		.expect("valid test request")
}

pub fn json_body(response: &Response) -> serde_json::Value {
	serde_json::from_slice(&response.body).expect("response body is json")
}

enum JournalMode {
	Pass,
	Halt,
	Fail,
}

/// Interceptor that journals each phase under its label.
pub struct Journal {
	label: &'static str,
	entries: Arc<Mutex<Vec<String>>>,
	mode: JournalMode,
}

impl Journal {
	pub fn new(label: &'static str, entries: Arc<Mutex<Vec<String>>>) -> Self {
		Self {
			label,
			entries,
			mode: JournalMode::Pass,
		}
	}

	/// Same journal, but `pre_handle` refuses the request.
	pub fn halting(label: &'static str, entries: Arc<Mutex<Vec<String>>>) -> Self {
		Self {
			label,
			entries,
			mode: JournalMode::Halt,
		}
	}

	/// Same journal, but `pre_handle` fails outright.
	pub fn failing(label: &'static str, entries: Arc<Mutex<Vec<String>>>) -> Self {
		Self {
			label,
			entries,
			mode: JournalMode::Fail,
		}
	}

	fn record(&self, phase: &str) {
		self.entries
			.lock()
			.expect("journal lock")
			.push(format!("{}:{}", self.label, phase));
	}
}

#[async_trait]
impl Interceptor for Journal {
	async fn pre_handle(&self, _request: &Request) -> Result<PreHandle, DispatchError> {
		self.record("pre");
		match self.mode {
			JournalMode::Pass => Ok(PreHandle::Continue),
			JournalMode::Halt => Ok(PreHandle::Halt(Response::no_content())),
			JournalMode::Fail => Err(DispatchError::handler("interceptor refused")),
		}
	}

	async fn post_handle(
		&self,
		_request: &Request,
		_outcome: &mut Outcome,
	) -> Result<(), DispatchError> {
		self.record("post");
		Ok(())
	}

	async fn after_completion(
		&self,
		_request: &Request,
		error: Option<&DispatchError>,
	) -> Result<(), DispatchError> {
		if error.is_some() {
			self.record("after(err)");
		} else {
			self.record("after");
		}
		Ok(())
	}
}
