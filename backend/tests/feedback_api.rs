//! End-to-end HTTP behaviour of the feedback API over a real SQLite store.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{TimeDelta, TimeZone, Utc};
use feedback_backend::Trace;
use feedback_backend::domain::ports::{AssistantQuery, FeedbackRepository, ListWindow};
use feedback_backend::domain::{
    AssistantAnswer, Error, FeedbackService, Question, TRACE_ID_HEADER,
};
use feedback_backend::inbound::http::configure_api;
use feedback_backend::inbound::http::state::HttpState;
use feedback_backend::outbound::persistence::DieselFeedbackRepository;
use feedback_backend::test_support::SteppingClock;
use feedback_backend::test_support::sqlite::TempDatabase;
use rstest::rstest;
use serde_json::{Value, json};

/// Assistant double that must never be reached by these tests.
struct UnusedAssistant;

#[async_trait]
impl AssistantQuery for UnusedAssistant {
    async fn ask(&self, _question: Question) -> Result<AssistantAnswer, Error> {
        Err(Error::internal("assistant not wired in feedback tests"))
    }
}

struct Harness {
    repository: Arc<DieselFeedbackRepository>,
    state: web::Data<HttpState>,
    _database: TempDatabase,
}

async fn harness() -> Harness {
    let database = TempDatabase::new().await.expect("temp database");
    let repository = Arc::new(DieselFeedbackRepository::new(database.pool()));
    let start = Utc
        .with_ymd_and_hms(2025, 5, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    let clock = Arc::new(SteppingClock::new(start, TimeDelta::milliseconds(10)));
    let service = Arc::new(FeedbackService::new(repository.clone(), clock));
    let state = web::Data::new(HttpState::new(
        service.clone(),
        service,
        Arc::new(UnusedAssistant),
    ));
    Harness {
        repository,
        state,
        _database: database,
    }
}

fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .configure(configure_api)
}

async fn row_count(repository: &DieselFeedbackRepository) -> usize {
    repository
        .list(ListWindow::all())
        .await
        .expect("list rows")
        .len()
}

fn payload(title: &str) -> Value {
    json!({"title": title, "content": "details", "author": "tester"})
}

#[actix_web::test]
async fn create_list_delete_scenario() {
    let harness = harness().await;
    let app = actix_test::init_service(app(harness.state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(json!({"title": "Bug", "content": "Crashes on save", "author": "Alice"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(response).await;
    assert_eq!(created["data"]["id"], json!(1));
    assert_eq!(created["message"], json!("Feedback added successfully"));

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/feedback").to_request(),
    )
    .await;
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(listed["data"][0]["title"], json!("Bug"));

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/feedback/1")
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/feedback").to_request(),
    )
    .await;
    assert_eq!(listed, json!({"success": true, "data": []}));
}

#[actix_web::test]
async fn successive_creates_increase_ids_and_timestamps() {
    let harness = harness().await;
    let app = actix_test::init_service(app(harness.state.clone())).await;

    let mut previous: Option<(i64, String)> = None;
    for index in 0..3 {
        let body: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/feedback")
                .set_json(payload(&format!("entry {index}")))
                .to_request(),
        )
        .await;
        let id = body["data"]["id"].as_i64().expect("numeric id");
        let timestamp = body["data"]["timestamp"]
            .as_str()
            .expect("timestamp string")
            .to_owned();
        if let Some((prev_id, prev_timestamp)) = previous {
            assert!(id > prev_id);
            assert!(timestamp >= prev_timestamp);
        }
        previous = Some((id, timestamp));
    }
}

#[actix_web::test]
async fn rejected_create_writes_nothing() {
    let harness = harness().await;
    let app = actix_test::init_service(app(harness.state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(json!({"title": "Only a title"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    assert_eq!(row_count(&harness.repository).await, 0);
}

#[actix_web::test]
async fn deleting_unknown_id_leaves_rows_untouched() {
    let harness = harness().await;
    let app = actix_test::init_service(app(harness.state.clone())).await;
    for title in ["a", "b"] {
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/feedback")
                .set_json(payload(title))
                .to_request(),
        )
        .await;
    }

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/feedback/999")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("Feedback not found"));
    assert_eq!(row_count(&harness.repository).await, 2);
}

#[actix_web::test]
async fn update_changes_text_and_status_but_not_identity() {
    let harness = harness().await;
    let app = actix_test::init_service(app(harness.state.clone())).await;
    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(payload("draft"))
            .to_request(),
    )
    .await;

    let updated: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/feedback/1")
            .set_json(json!({
                "title": "final",
                "content": "details",
                "author": "tester",
                "status": "resolved",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(updated["data"]["id"], created["data"]["id"]);
    assert_eq!(updated["data"]["timestamp"], created["data"]["timestamp"]);
    assert_eq!(updated["data"]["title"], json!("final"));
    assert_eq!(updated["data"]["status"], json!("resolved"));

    let missing = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/feedback/77")
            .set_json(payload("ghost"))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(5)]
#[actix_web::test]
async fn paged_listing_concatenates_to_full_listing(#[case] limit: usize) {
    const TOTAL: usize = 5;
    let harness = harness().await;
    let app = actix_test::init_service(app(harness.state.clone())).await;
    for index in 0..TOTAL {
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/feedback")
                .set_json(payload(&format!("entry {index}")))
                .to_request(),
        )
        .await;
    }
    let full: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/feedback").to_request(),
    )
    .await;

    let mut pages = 0;
    let mut collected = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let uri = match &cursor {
            Some(token) => format!("/api/feedback?limit={limit}&cursor={token}"),
            None => format!("/api/feedback?limit={limit}"),
        };
        let page: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri(&uri).to_request(),
        )
        .await;
        pages += 1;
        collected.extend(page["data"].as_array().cloned().unwrap_or_default());
        match page["nextCursor"].as_str() {
            Some(token) => cursor = Some(token.to_owned()),
            None => break,
        }
    }

    assert_eq!(pages, TOTAL.div_ceil(limit));
    assert_eq!(Value::Array(collected), full["data"]);
}
