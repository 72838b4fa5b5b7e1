//! The full demo tour driven end to end: every route of the `mvc` and
//! `rest` controllers, dispatched in process.

use std::sync::Arc;

use grappelli::prelude::*;
use grappelli_integration_tests::{
	get, json_body, multipart_request, post_form, request, tour_dispatcher,
};
use hyper::Method;
use rstest::rstest;
use tempfile::TempDir;

#[tokio::test]
async fn test_hello_renders_the_hello_view() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/mvc/hello")).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(json_body(&response)["view"], "hello");
}

#[tokio::test]
async fn test_person_binds_two_query_scalars() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/mvc/person?name=jay&age=20")).await;

	let body = json_body(&response);
	assert_eq!(body["view"], "person");
	assert_eq!(body["data"]["name"], "jay");
	assert_eq!(body["data"]["age"], 20.0);
}

#[tokio::test]
async fn test_person_age_is_optional() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/mvc/person?name=jay")).await;

	let body = json_body(&response);
	assert_eq!(body["data"]["name"], "jay");
	assert!(body["data"]["age"].is_null());
}

#[tokio::test]
async fn test_person1_binds_the_whole_record() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher
		.dispatch(get("/mvc/person1?name=jay&age=20&birth=1990-01-01"))
		.await;

	let person = &json_body(&response)["data"]["person"];
	assert_eq!(person["name"], "jay");
	assert_eq!(person["age"], 20.0);
	assert_eq!(person["birth"], "1990-01-01");
}

#[tokio::test]
async fn test_date_binds_with_the_default_format() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/mvc/date?date=2018-08-27")).await;

	assert_eq!(json_body(&response)["data"]["date"], "2018-08-27");
}

#[tokio::test]
async fn test_show_provides_server_side_data() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/mvc/show")).await;

	let person = &json_body(&response)["data"]["p"];
	assert_eq!(person["name"], "jay");
	assert_eq!(person["age"], 20.0);
	assert!(person["birth"].is_null());
}

#[tokio::test]
async fn test_redirect_prefix_switches_to_a_redirect() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/mvc/redirect")).await;

	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.headers.get("location").unwrap(), "hello");
	assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_param_echoes_typed_parameters() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/mvc/param?id=7&name=grappelli")).await;

	let body = json_body(&response);
	assert_eq!(body["data"]["id"], 7);
	assert_eq!(body["data"]["name"], "grappelli");
}

#[tokio::test]
async fn test_user_serializes_to_json() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/mvc/user")).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		response.headers.get("content-type").unwrap(),
		"application/json"
	);
	let body = json_body(&response);
	assert_eq!(body["id"], 1);
	assert_eq!(body["name"], "jay");
	assert_eq!(body["birth"], "1990-01-01");
}

#[tokio::test]
async fn test_error_route_is_resolved_to_the_error_view() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/mvc/error")).await;

	assert_eq!(response.status, StatusCode::OK);
	let body = json_body(&response);
	assert_eq!(body["view"], "error");
	assert!(
		body["data"]["exception"]
			.as_str()
			.unwrap()
			.contains("deliberate failure")
	);
}

#[rstest]
#[case::get(Method::GET)]
#[case::post(Method::POST)]
#[case::put(Method::PUT)]
#[case::delete(Method::DELETE)]
#[tokio::test]
async fn test_rest_routes_answer_on_every_verb(#[case] method: Method) {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(request(method, "/rest/user/3")).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(json_body(&response)["view"], "hello");
}

fn upload_dispatcher(store: Arc<UploadStore>) -> Dispatcher {
	let controller = Controller::new("mvc").route(
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
	);
	Dispatcher::builder()
		.controller(controller)
		.build()
		.expect("upload route is unique")
}

#[tokio::test]
async fn test_upload_stores_the_file_on_disk() {
	// Arrange
	let dir = TempDir::new().unwrap();
	let store = Arc::new(UploadStore::new(dir.path()));
	let dispatcher = upload_dispatcher(store);
	let request = multipart_request(
		"/mvc/upload",
		"tourboundary",
		&[("memo", "note")],
		&[("file", "hello.txt", "upload payload")],
	);

	// Act
	let response = dispatcher.dispatch(request).await;

	// Assert
	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(json_body(&response)["view"], "upload");
	let entries: Vec<_> = std::fs::read_dir(dir.path())
		.unwrap()
		.map(|entry| entry.unwrap().path())
		.collect();
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0].extension().unwrap(), "txt");
	assert_eq!(std::fs::read_to_string(&entries[0]).unwrap(), "upload payload");
}

#[tokio::test]
async fn test_upload_rejects_oversized_files() {
	let dir = TempDir::new().unwrap();
	let store = Arc::new(UploadStore::new(dir.path()).with_max_size(4));
	let dispatcher = upload_dispatcher(store);
	let request = multipart_request(
		"/mvc/upload",
		"tourboundary",
		&[],
		&[("file", "big.txt", "more than four bytes")],
	);

	let response = dispatcher.dispatch(request).await;

	assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
	assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_upload_requires_a_multipart_body() {
	let dir = TempDir::new().unwrap();
	let store = Arc::new(UploadStore::new(dir.path()));
	let dispatcher = upload_dispatcher(store);

	let response = dispatcher
		.dispatch(post_form("/mvc/upload", "file=not-a-file"))
		.await;

	assert_eq!(response.status, StatusCode::BAD_REQUEST);
	assert!(
		json_body(&response)["error"]
			.as_str()
			.unwrap()
			.contains("multipart")
	);
}
