use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fsrouter::{
    ConfigError, HandlerRequest, HandlerResponse, Middleware, RouteBuilder, Step,
};
use http::Method;
use serde_json::json;

mod tracing_util;
use tracing_util::TestTracing;

fn ok_handler(tag: &'static str) -> impl Fn(&mut HandlerRequest) -> anyhow::Result<HandlerResponse> {
    move |_req| Ok(HandlerResponse::ok_json(json!({ "handler": tag })))
}

#[test]
fn test_second_on_for_same_method_is_rejected() {
    let mut route = RouteBuilder::new();
    route.on(Method::GET, ok_handler("first")).unwrap();

    let err = route.on(Method::GET, ok_handler("second")).unwrap_err();
    assert_eq!(err, ConfigError::DuplicateMethod { method: Method::GET });

    // The first registration stays intact.
    let handler = route.compose(&Method::GET).unwrap();
    let resp = handler(&mut HandlerRequest::new(Method::GET, "/")).unwrap();
    assert_eq!(resp.body, json!({ "handler": "first" }));
    assert_eq!(route.supported_methods(), [Method::GET]);
}

#[test]
fn test_second_schema_for_same_method_is_rejected() {
    let _tracing = TestTracing::init();
    let mut route = RouteBuilder::new();
    route
        .schema(Method::POST, |s| {
            s.body(json!({ "type": "object", "required": ["name"] }))
        })
        .unwrap();

    let err = route
        .schema(Method::POST, |s| s.body(json!({ "type": "object" })))
        .unwrap_err();
    assert_eq!(err, ConfigError::DuplicateSchema { method: Method::POST });

    // The first schema remains in effect: a body missing "name" is rejected.
    route.on(Method::POST, ok_handler("post")).unwrap();
    let handler = route.compose(&Method::POST).unwrap();
    let mut req = HandlerRequest::new(Method::POST, "/");
    req.body = json!({});
    let resp = handler(&mut req).unwrap();
    assert_eq!(resp.status, 400);
}

#[test]
fn test_emit_for_unregistered_method_is_a_config_error() {
    let route = RouteBuilder::new();
    let err = route.emit(&Method::DELETE).unwrap_err();
    assert_eq!(err, ConfigError::UnregisteredMethod { method: Method::DELETE });
    assert!(route.compose(&Method::DELETE).is_err());
}

#[test]
fn test_supported_methods_keeps_registration_order() {
    let mut route = RouteBuilder::new();
    route
        .on(Method::POST, ok_handler("post"))
        .unwrap()
        .on(Method::GET, ok_handler("get"))
        .unwrap()
        .on(Method::DELETE, ok_handler("delete"))
        .unwrap();

    assert_eq!(
        route.supported_methods(),
        [Method::POST, Method::GET, Method::DELETE]
    );
}

#[test]
fn test_user_middleware_runs_before_validation() {
    struct Recorder {
        log: Arc<Mutex<Vec<&'static str>>>,
    }
    impl Middleware for Recorder {
        fn call(&self, _req: &mut HandlerRequest) -> anyhow::Result<Step> {
            self.log.lock().unwrap().push("user");
            Ok(Step::Continue)
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut route = RouteBuilder::new();
    route.middleware(Method::POST, Arc::new(Recorder { log: Arc::clone(&log) }));
    route
        .schema(Method::POST, |s| {
            s.body(json!({ "type": "object", "required": ["name"] }))
        })
        .unwrap();
    route.on(Method::POST, ok_handler("post")).unwrap();

    let handler = route.compose(&Method::POST).unwrap();
    let mut req = HandlerRequest::new(Method::POST, "/");
    req.body = json!({});
    let resp = handler(&mut req).unwrap();

    // The user middleware saw the request, then validation answered 400.
    assert_eq!(resp.status, 400);
    assert_eq!(*log.lock().unwrap(), vec!["user"]);
}

#[test]
fn test_schema_defined_after_on_still_validates() {
    let mut route = RouteBuilder::new();
    route.on(Method::POST, ok_handler("post")).unwrap();
    let handler = route.compose(&Method::POST).unwrap();

    // Attach the schema after both `on` and composition: validation reads
    // the schema table at request time.
    route
        .schema(Method::POST, |s| {
            s.body(json!({ "type": "object", "required": ["name"] }))
        })
        .unwrap();

    let mut req = HandlerRequest::new(Method::POST, "/");
    req.body = json!({});
    assert_eq!(handler(&mut req).unwrap().status, 400);

    let mut valid = HandlerRequest::new(Method::POST, "/");
    valid.body = json!({ "name": "ada" });
    assert_eq!(handler(&mut valid).unwrap().status, 200);
}

#[test]
fn test_method_without_schema_passes_request_through() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let mut route = RouteBuilder::new();
    route
        .on(Method::GET, move |req: &mut HandlerRequest| {
            seen.fetch_add(1, Ordering::SeqCst);
            assert_eq!(req.body, json!({ "untouched": 1 }));
            Ok(HandlerResponse::ok_json(json!(null)))
        })
        .unwrap();

    let handler = route.compose(&Method::GET).unwrap();
    let mut req = HandlerRequest::new(Method::GET, "/");
    req.body = json!({ "untouched": 1 });

    assert_eq!(handler(&mut req).unwrap().status, 200);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_duplicate_method_error_aborts_constructor_chain() {
    // The way a route module actually hits the guard: the `?` chain stops at
    // the second `on` and the constructor returns the error.
    fn build() -> anyhow::Result<RouteBuilder> {
        let mut route = RouteBuilder::new();
        route
            .on(Method::GET, ok_handler("a"))?
            .on(Method::GET, ok_handler("b"))?;
        Ok(route)
    }

    let err = build().unwrap_err();
    assert!(err.to_string().contains("already registered"));
}
