//! The MVC tour: one small server exercising every framework feature.
//!
//! Run it with `cargo run -p mvc-tour`, then visit:
//!
//! ```bash
//! curl http://127.0.0.1:8000/mvc/hello
//! curl "http://127.0.0.1:8000/mvc/person?name=jay&age=20"
//! curl "http://127.0.0.1:8000/mvc/person1?name=jay&age=20&birth=1990-01-01"
//! curl "http://127.0.0.1:8000/mvc/date?date=2018-08-27"
//! curl http://127.0.0.1:8000/mvc/show
//! curl -i http://127.0.0.1:8000/mvc/redirect
//! curl "http://127.0.0.1:8000/mvc/param?id=7&name=grappelli"
//! curl http://127.0.0.1:8000/mvc/user
//! curl http://127.0.0.1:8000/mvc/error
//! curl -F "file=@notes.txt" http://127.0.0.1:8000/mvc/upload
//! curl -X PUT http://127.0.0.1:8000/rest/user/3
//! ```
//!
//! Configuration comes from the environment: `GRAPPELLI_DATE_FORMAT`,
//! `GRAPPELLI_UPLOAD_DIR` and `GRAPPELLI_UPLOAD_MAX_SIZE`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use grappelli::prelude::*;

#[derive(Debug, Clone, Serialize)]
struct Person {
	name: String,
	age: f64,
	birth: Option<NaiveDate>,
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

#[derive(Debug, Clone, Serialize)]
struct User {
	id: i64,
	name: String,
	birth: Option<NaiveDate>,
}

fn mvc_controller(store: Arc<UploadStore>) -> Controller {
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
			RouteMethod::Post,
			"/mvc/upload",
			vec![ParamSpec::file("file")],
			handler_fn(move |args| {
				let store = store.clone();
				async move {
					let file = args.file("file")?;
					let stored = store.store(file)?;
					Ok(Outcome::view("upload").with_data("stored", stored.display().to_string()))
				}
			}),
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

fn rest_controller() -> Controller {
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt::init();

	let settings = Settings::from_env()?;
	let store = Arc::new(
		UploadStore::new(settings.upload.dir.clone()).with_max_size(settings.upload.max_size),
	);

	let mut registry = grappelli::ConverterRegistry::with_defaults();
	registry.register_record::<Person>();

	let dispatcher = Dispatcher::builder()
		.registry(registry)
		.controller(mvc_controller(store))
		.controller(rest_controller())
		.interceptor(Arc::new(LoggingInterceptor::new()))
		.exception_handler(ErrorMatch::Any, |err| {
			Outcome::view("error").with_data("exception", err.to_string())
		})
		.date_format(settings.date_format)
		.build()?;

	serve("127.0.0.1:8000".parse()?, Arc::new(dispatcher)).await
}
