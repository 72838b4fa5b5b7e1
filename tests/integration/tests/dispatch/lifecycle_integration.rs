//! Interceptor bracketing and the request lifecycle, end to end.

use std::sync::{Arc, Mutex};

use grappelli::prelude::*;
use grappelli_integration_tests::{Journal, get, json_body, tour_builder};

fn journal() -> Arc<Mutex<Vec<String>>> {
	Arc::new(Mutex::new(Vec::new()))
}

fn entries(journal: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
	journal.lock().unwrap().clone()
}

#[tokio::test]
async fn test_success_runs_all_phases_in_registration_order() {
	let log = journal();
	let dispatcher = tour_builder()
		.interceptor(Arc::new(Journal::new("a", log.clone())))
		.interceptor(Arc::new(Journal::new("b", log.clone())))
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/mvc/hello")).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		entries(&log),
		vec!["a:pre", "b:pre", "a:post", "b:post", "a:after", "b:after"]
	);
}

/// A false pre_handle stops the chain: later interceptors never start,
/// the handler never runs, and only the interceptors that saw pre get
/// their after_completion.
#[tokio::test]
async fn test_halting_pre_stops_the_chain() {
	let log = journal();
	let dispatcher = tour_builder()
		.interceptor(Arc::new(Journal::new("a", log.clone())))
		.interceptor(Arc::new(Journal::halting("gate", log.clone())))
		.interceptor(Arc::new(Journal::new("c", log.clone())))
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/mvc/hello")).await;

	assert_eq!(response.status, StatusCode::NO_CONTENT);
	assert_eq!(
		entries(&log),
		vec!["a:pre", "gate:pre", "a:after", "gate:after"]
	);
}

/// A handler failure skips post_handle but after_completion still runs,
/// and it receives the error even though a resolver turned it into a
/// normal error view.
#[tokio::test]
async fn test_handler_failure_still_reaches_after_completion() {
	let log = journal();
	let dispatcher = tour_builder()
		.interceptor(Arc::new(Journal::new("a", log.clone())))
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/mvc/error")).await;

	// Resolved by the local handler on the mvc controller.
	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(json_body(&response)["view"], "error");
	assert_eq!(entries(&log), vec!["a:pre", "a:after(err)"]);
}

#[tokio::test]
async fn test_failing_pre_is_resolved_and_bracketed() {
	let log = journal();
	let dispatcher = tour_builder()
		.interceptor(Arc::new(Journal::failing("bad", log.clone())))
		.interceptor(Arc::new(Journal::new("b", log.clone())))
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/mvc/hello")).await;

	// The failure happens inside the mvc controller's scope, so its
	// local catch-all answers; only "bad" saw pre, so only "bad" gets
	// an after.
	assert_eq!(response.status, StatusCode::OK);
	let body = json_body(&response);
	assert_eq!(body["view"], "error");
	assert!(
		body["data"]["exception"]
			.as_str()
			.unwrap()
			.contains("interceptor refused")
	);
	assert_eq!(entries(&log), vec!["bad:pre", "bad:after(err)"]);
}

#[tokio::test]
async fn test_route_miss_never_consults_interceptors() {
	let log = journal();
	let dispatcher = tour_builder()
		.interceptor(Arc::new(Journal::new("a", log.clone())))
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/absent")).await;

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert!(entries(&log).is_empty());
}

struct Rewriter;

#[async_trait]
impl Interceptor for Rewriter {
	async fn post_handle(
		&self,
		_request: &Request,
		outcome: &mut Outcome,
	) -> Result<(), DispatchError> {
		*outcome = Outcome::view("rewritten");
		Ok(())
	}
}

#[tokio::test]
async fn test_post_handle_can_replace_the_outcome() {
	let dispatcher = tour_builder()
		.interceptor(Arc::new(Rewriter))
		.build()
		.unwrap();

	let response = dispatcher.dispatch(get("/mvc/hello")).await;

	assert_eq!(json_body(&response)["view"], "rewritten");
}

/// Every terminal path produces exactly one rendered response with a
/// coherent status.
#[tokio::test]
async fn test_each_terminal_path_renders_exactly_once() {
	let dispatcher = tour_builder().build().unwrap();

	let ok = dispatcher.dispatch(get("/mvc/hello")).await;
	assert_eq!(ok.status, StatusCode::OK);

	let redirect = dispatcher.dispatch(get("/mvc/redirect")).await;
	assert_eq!(redirect.status, StatusCode::FOUND);
	assert!(redirect.body.is_empty());

	let resolved_error = dispatcher.dispatch(get("/mvc/error")).await;
	assert_eq!(resolved_error.status, StatusCode::OK);

	let miss = dispatcher.dispatch(get("/absent")).await;
	assert_eq!(miss.status, StatusCode::NOT_FOUND);
}
