//! Route resolution behavior, driven end-to-end through the dispatcher.

use grappelli::prelude::*;
use grappelli_integration_tests::{get, json_body, request, tour_dispatcher};
use hyper::Method;

#[tokio::test]
async fn test_path_variable_reaches_the_handler() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/rest/user/41")).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(json_body(&response)["view"], "hello");
}

#[tokio::test]
async fn test_path_variable_type_failure_resolves_to_error_view() {
	let dispatcher = tour_dispatcher();

	// `{id}` is declared i64; the rest controller has no local handler,
	// so the global one answers.
	let response = dispatcher.dispatch(get("/rest/user/not-a-number")).await;

	assert_eq!(response.status, StatusCode::OK);
	let body = json_body(&response);
	assert_eq!(body["view"], "error");
	assert!(
		body["data"]["exception"]
			.as_str()
			.unwrap()
			.contains("not-a-number")
	);
}

#[tokio::test]
async fn test_trailing_slash_resolves_like_bare_path() {
	let dispatcher = tour_dispatcher();

	let bare = dispatcher.dispatch(get("/mvc/hello")).await;
	let slashed = dispatcher.dispatch(get("/mvc/hello/")).await;

	assert_eq!(bare.status, StatusCode::OK);
	assert_eq!(slashed.status, StatusCode::OK);
	assert_eq!(json_body(&bare)["view"], json_body(&slashed)["view"]);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
	let dispatcher = tour_dispatcher();

	let response = dispatcher.dispatch(get("/absent")).await;

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert!(json_body(&response)["error"].as_str().unwrap().contains("/absent"));
}

#[tokio::test]
async fn test_unregistered_verb_is_404() {
	let dispatcher = tour_dispatcher();

	// /mvc/hello is registered for GET only.
	let response = dispatcher.dispatch(request(Method::POST, "/mvc/hello")).await;

	assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resolution_is_deterministic_across_repeats() {
	let dispatcher = tour_dispatcher();

	for _ in 0..3 {
		let response = dispatcher.dispatch(get("/mvc/show")).await;
		assert_eq!(response.status, StatusCode::OK);
		assert_eq!(json_body(&response)["data"]["p"]["name"], "jay");
	}
}

/// Specific-method routes beat the ANY wildcard no matter which was
/// registered first.
#[tokio::test]
async fn test_specific_verb_beats_wildcard_regardless_of_order() {
	let wildcard_first = Dispatcher::builder()
		.route(
			RouteMethod::Any,
			"/user/{id}",
			vec![],
			handler_fn(|_args| async { Ok(Outcome::view("any")) }),
		)
		.route(
			RouteMethod::Delete,
			"/user/{id}",
			vec![],
			handler_fn(|_args| async { Ok(Outcome::view("delete")) }),
		)
		.build()
		.unwrap();
	let specific_first = Dispatcher::builder()
		.route(
			RouteMethod::Delete,
			"/user/{id}",
			vec![],
			handler_fn(|_args| async { Ok(Outcome::view("delete")) }),
		)
		.route(
			RouteMethod::Any,
			"/user/{id}",
			vec![],
			handler_fn(|_args| async { Ok(Outcome::view("any")) }),
		)
		.build()
		.unwrap();

	for dispatcher in [&wildcard_first, &specific_first] {
		let response = dispatcher.dispatch(request(Method::DELETE, "/user/9")).await;
		assert_eq!(json_body(&response)["view"], "delete");

		let response = dispatcher.dispatch(request(Method::PUT, "/user/9")).await;
		assert_eq!(json_body(&response)["view"], "any");
	}
}

#[tokio::test]
async fn test_duplicate_pattern_fails_at_startup() {
	// Variable names do not disambiguate: both match the same paths.
	let result = Dispatcher::builder()
		.route(
			RouteMethod::Get,
			"/order/{id}",
			vec![],
			handler_fn(|_args| async { Ok(Outcome::view("a")) }),
		)
		.route(
			RouteMethod::Get,
			"/order/{code}",
			vec![],
			handler_fn(|_args| async { Ok(Outcome::view("b")) }),
		)
		.build();

	assert!(result.is_err());
}
