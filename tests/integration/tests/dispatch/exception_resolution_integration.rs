//! Two-tier exception resolution, exercised through full dispatches.

use chrono::NaiveDate;
use grappelli::BindErrorKind;
use grappelli::prelude::*;
use grappelli_integration_tests::{get, json_body};

/// A controller whose only route fails on purpose.
fn failing_controller(name: &str, path: &str) -> Controller {
	Controller::new(name).route(
		RouteMethod::Get,
		path,
		vec![],
		handler_fn(|_args| async { Err(DispatchError::handler("deliberate failure")) }),
	)
}

fn error_view(name: &'static str) -> impl Fn(&DispatchError) -> Outcome + Send + Sync + 'static {
	move |err| Outcome::view(name).with_data("exception", err.to_string())
}

#[tokio::test]
async fn test_local_catch_all_beats_global_exact_match() {
	// The local tier is exhausted before the global tier is consulted,
	// so even a vague local registration wins over a precise global one.
	let dispatcher = Dispatcher::builder()
		.controller(failing_controller("orders", "/orders/fail").on_error(
			ErrorMatch::Any,
			error_view("local-error"),
		))
		.exception_handler(ErrorMatch::Handler, error_view("global-handler"))
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/orders/fail")).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(json_body(&response)["view"], "local-error");
}

#[tokio::test]
async fn test_global_tier_answers_when_no_local_handler_matches() {
	let dispatcher = Dispatcher::builder()
		.controller(failing_controller("orders", "/orders/fail").on_error(
			ErrorMatch::Bind,
			error_view("local-bind"),
		))
		.exception_handler(ErrorMatch::Any, error_view("global-error"))
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/orders/fail")).await;

	assert_eq!(json_body(&response)["view"], "global-error");
}

#[tokio::test]
async fn test_specific_match_beats_catch_all_within_a_tier() {
	// Registration order does not matter within a tier; specificity does.
	let dispatcher = Dispatcher::builder()
		.controller(
			failing_controller("orders", "/orders/fail")
				.on_error(ErrorMatch::Any, error_view("local-any"))
				.on_error(ErrorMatch::Handler, error_view("local-handler")),
		)
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/orders/fail")).await;

	assert_eq!(json_body(&response)["view"], "local-handler");
}

#[tokio::test]
async fn test_unmatched_error_renders_a_generic_500() {
	let dispatcher = Dispatcher::builder()
		.controller(failing_controller("orders", "/orders/fail"))
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/orders/fail")).await;

	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	let body = json_body(&response);
	assert!(body["error"].as_str().unwrap().contains("deliberate failure"));
}

#[tokio::test]
async fn test_local_handlers_do_not_leak_across_controllers() {
	let dispatcher = Dispatcher::builder()
		.controller(failing_controller("alpha", "/alpha/fail").on_error(
			ErrorMatch::Any,
			error_view("alpha-error"),
		))
		.controller(failing_controller("beta", "/beta/fail"))
		.exception_handler(ErrorMatch::Any, error_view("global-error"))
		.build()
		.unwrap();

	let from_alpha = dispatcher.dispatch(get("/alpha/fail")).await;
	let from_beta = dispatcher.dispatch(get("/beta/fail")).await;

	assert_eq!(json_body(&from_alpha)["view"], "alpha-error");
	assert_eq!(json_body(&from_beta)["view"], "global-error");
}

#[tokio::test]
async fn test_bind_kind_matchers_select_by_failure_kind() {
	let controller = Controller::new("bind")
		.route(
			RouteMethod::Get,
			"/bind/date",
			vec![ParamSpec::param::<NaiveDate>("date")],
			handler_fn(|_args| async { Ok(Outcome::view("date")) }),
		)
		.route(
			RouteMethod::Get,
			"/bind/num",
			vec![ParamSpec::param::<i64>("n")],
			handler_fn(|_args| async { Ok(Outcome::view("num")) }),
		)
		.on_error(
			ErrorMatch::BindKind(BindErrorKind::MalformedDate),
			error_view("bad-date"),
		)
		.on_error(
			ErrorMatch::BindKind(BindErrorKind::TypeMismatch),
			error_view("bad-type"),
		);
	let dispatcher = Dispatcher::builder().controller(controller).build().unwrap();

	let date = dispatcher.dispatch(get("/bind/date?date=nope")).await;
	let num = dispatcher.dispatch(get("/bind/num?n=xx")).await;

	assert_eq!(json_body(&date)["view"], "bad-date");
	assert!(
		json_body(&date)["data"]["exception"]
			.as_str()
			.unwrap()
			.contains("nope")
	);
	assert_eq!(json_body(&num)["view"], "bad-type");
}

#[tokio::test]
async fn test_resolver_set_is_fixed_at_construction() {
	// Handlers registered on the builder are the complete set: a second
	// dispatcher built without them resolves nothing.
	let with_handlers = Dispatcher::builder()
		.controller(failing_controller("orders", "/orders/fail"))
		.exception_handler(ErrorMatch::Any, error_view("global-error"))
		.build()
		.unwrap();
	let without_handlers = Dispatcher::builder()
		.controller(failing_controller("orders", "/orders/fail"))
		.build()
		.unwrap();

	let resolved = with_handlers.dispatch(get("/orders/fail")).await;
	let unresolved = without_handlers.dispatch(get("/orders/fail")).await;

	assert_eq!(resolved.status, StatusCode::OK);
	assert_eq!(unresolved.status, StatusCode::INTERNAL_SERVER_ERROR);
}
