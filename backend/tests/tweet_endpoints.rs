//! Behavioural tests for the fully wired tweet API.
//!
//! These exercise the same middleware stack `main` assembles — translator,
//! CORS, request log, and route fallback — over the fixture store.

use std::sync::Arc;

use actix_cors::Cors;
use actix_http::Request;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use backend::config::RuntimeMode;
use backend::domain::ports::{FixtureTweetRepository, TweetRepository};
use backend::inbound::http::error::fallback;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::tweets;
use backend::middleware::{RequestLog, Translate};

const ALLOWED_ORIGIN: &str = "http://localhost:4000";

async fn init_app(
    mode: RuntimeMode,
    repository: Arc<dyn TweetRepository>,
) -> impl Service<
    Request,
    Response = ServiceResponse<EitherBody<EitherBody<BoxBody>>>,
    Error = actix_web::Error,
> {
    let cors = Cors::default()
        .allowed_origin(ALLOWED_ORIGIN)
        .allow_any_method()
        .allow_any_header();

    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(repository)))
            .service(tweets::routes())
            .default_service(web::route().to(fallback))
            .wrap(Translate::new(mode))
            .wrap(cors)
            .wrap(RequestLog),
    )
    .await
}

async fn dev_app() -> impl Service<
    Request,
    Response = ServiceResponse<EitherBody<EitherBody<BoxBody>>>,
    Error = actix_web::Error,
> {
    init_app(
        RuntimeMode::Development,
        Arc::new(FixtureTweetRepository::default()),
    )
    .await
}

#[actix_web::test]
async fn create_get_update_delete_round_trip() {
    let app = dev_app().await;

    // Create.
    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/tweets")
            .set_json(json!({"message": "hello"}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);
    let created_body: Value = test::read_body_json(created).await;
    assert_eq!(created_body, json!({"tweet": {"id": 1, "message": "hello"}}));

    // Read back.
    let fetched: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/tweets/1").to_request(),
    )
    .await;
    assert_eq!(fetched, json!({"tweet": {"id": 1, "message": "hello"}}));

    // Update and read back.
    let updated: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::put()
            .uri("/tweets/1")
            .set_json(json!({"message": "changed"}))
            .to_request(),
    )
    .await;
    assert_eq!(updated, json!({"oldTweet": {"id": 1, "message": "changed"}}));
    let refetched: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/tweets/1").to_request(),
    )
    .await;
    assert_eq!(refetched, json!({"tweet": {"id": 1, "message": "changed"}}));

    // Delete, then every read misses.
    let deleted = test::call_service(
        &app,
        test::TestRequest::delete().uri("/tweets/1").to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missed = test::call_service(
        &app,
        test::TestRequest::get().uri("/tweets/1").to_request(),
    )
    .await;
    assert_eq!(missed.status(), StatusCode::NOT_FOUND);
    let missed_body: Value = test::read_body_json(missed).await;
    assert_eq!(missed_body.get("title"), Some(&json!("Tweet not found")));
    assert_eq!(
        missed_body.get("message"),
        Some(&json!("The tweet of 1 could not be found."))
    );
}

#[actix_web::test]
async fn listing_reflects_store_order() {
    let app = init_app(
        RuntimeMode::Development,
        Arc::new(FixtureTweetRepository::seeded(["one", "two", "three"])),
    )
    .await;

    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/tweets").to_request())
            .await;
    assert_eq!(
        body,
        json!({"tweets": [
            {"id": 1, "message": "one"},
            {"id": 2, "message": "two"},
            {"id": 3, "message": "three"},
        ]})
    );
}

#[rstest]
#[case("", json!(["Please provide a value for Message"]))]
#[case("x", Value::Null)]
#[actix_web::test]
async fn validation_runs_for_create_and_update(#[case] message: &str, #[case] errors: Value) {
    let app = init_app(
        RuntimeMode::Development,
        Arc::new(FixtureTweetRepository::seeded(["seed"])),
    )
    .await;

    for request in [
        test::TestRequest::post()
            .uri("/tweets")
            .set_json(json!({"message": message}))
            .to_request(),
        test::TestRequest::put()
            .uri("/tweets/1")
            .set_json(json!({"message": message}))
            .to_request(),
    ] {
        let response = test::call_service(&app, request).await;
        if errors.is_null() {
            assert_eq!(response.status(), StatusCode::OK);
        } else {
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(response).await;
            assert_eq!(body.get("title"), Some(&json!("Bad request.")));
            assert_eq!(body.get("errors"), Some(&errors));
        }
    }
}

#[actix_web::test]
async fn unmatched_routes_render_the_generic_envelope() {
    let app = dev_app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/timeline").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("title"), Some(&json!("Server Error")));
    assert_eq!(
        body.get("message"),
        Some(&json!("The requested resource couldn't be found."))
    );
}

#[actix_web::test]
async fn malformed_json_is_translated_not_crashed() {
    let app = dev_app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/tweets")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("title"), Some(&json!("Server Error")));
}

#[actix_web::test]
async fn cors_headers_only_for_the_configured_origin() {
    let app = dev_app().await;

    let allowed = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/tweets")
            .insert_header((header::ORIGIN, ALLOWED_ORIGIN))
            .to_request(),
    )
    .await;
    assert_eq!(
        allowed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );

    // A foreign origin is refused: whether the middleware short-circuits or
    // answers without CORS headers, the allow-origin header never appears.
    let denied = app
        .call(
            test::TestRequest::get()
                .uri("/tweets")
                .insert_header((header::ORIGIN, "http://evil.example"))
                .to_request(),
        )
        .await;
    match denied {
        Ok(response) => assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        ),
        Err(err) => assert!(
            err.error_response()
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        ),
    }
}

#[rstest]
#[case(RuntimeMode::Production, true)]
#[case(RuntimeMode::Development, false)]
#[actix_web::test]
async fn stack_visibility_follows_runtime_mode(#[case] mode: RuntimeMode, #[case] hidden: bool) {
    let app = init_app(mode, Arc::new(FixtureTweetRepository::default())).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/tweets/42").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(response).await;
    match body.get("stack") {
        Some(stack) if hidden => assert!(stack.is_null()),
        Some(stack) => assert!(stack.is_string()),
        None => panic!("stack key must always be present"),
    }
}
