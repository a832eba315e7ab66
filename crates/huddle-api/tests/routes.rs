use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

use huddle_api::config::AppConfig;
use huddle_api::middleware::acting_user::USER_HEADER;
use huddle_api::notify::{BodyFormat, CompletionNotice, CompletionNotifier};
use huddle_api::state::AppState;
use huddle_storage::store::MemoryStore;

struct RecordingNotifier {
    tx: mpsc::UnboundedSender<CompletionNotice>,
}

#[async_trait]
impl CompletionNotifier for RecordingNotifier {
    async fn participation_completed(&self, notice: CompletionNotice) {
        let _ = self.tx.send(notice);
    }
}

struct TestApp {
    router: Router,
    notices: mpsc::UnboundedReceiver<CompletionNotice>,
}

fn test_app(config: AppConfig) -> TestApp {
    let (tx, notices) = mpsc::unbounded_channel();
    let state = AppState::new(
        config,
        Arc::new(MemoryStore::new()),
        Arc::new(RecordingNotifier { tx }),
    );
    TestApp {
        router: huddle_api::app(state),
        notices,
    }
}

impl TestApp {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(USER_HEADER, user);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(method, uri, Some("admin-1"), body).await
    }

    async fn create_assessment(&self, name: &str) -> Value {
        let (status, body) = self
            .admin(
                Method::POST,
                "/admin/assessments",
                Some(json!({
                    "name": name,
                    "description": "d",
                    "callToAction": "Start",
                    "imageUrl": "x.png",
                    "resultCallToAction": {
                        "heading": "Want more?",
                        "copy": "Get in touch",
                        "buttonText": "Contact us",
                        "url": "https://example.com/contact"
                    }
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check_is_open() {
    let app = test_app(AppConfig::default());
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn admin_routes_require_an_acting_user() {
    let app = test_app(AppConfig::default());
    let (status, body) = app
        .send(Method::GET, "/admin/assessments", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains(USER_HEADER));
}

#[tokio::test]
async fn invalid_assessment_returns_every_field_error() {
    let app = test_app(AppConfig::default());
    let (status, body) = app
        .admin(
            Method::POST,
            "/admin/assessments",
            Some(json!({ "name": "Quiz", "resultCallToAction": { "url": "example.com" } })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["description", "callToAction", "assessmentImage", "resultCtaUrl"]
    );
}

#[tokio::test]
async fn authoring_flow_builds_nested_documents() {
    let app = test_app(AppConfig::default());
    let assessment = app.create_assessment("Color Quiz").await;
    let id = id_of(&assessment);
    assert_eq!(assessment["shortUrl"], "color-quiz");
    assert_eq!(assessment["createdBy"], "admin-1");

    let (status, assessment) = app
        .admin(
            Method::POST,
            &format!("/admin/assessments/{id}/questions"),
            Some(json!({ "questionText": "What's your favorite color?", "description": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(assessment["questions"].as_array().unwrap().len(), 1);
    let question_id = id_of(&assessment["questions"][0]);

    let (status, assessment) = app
        .admin(
            Method::POST,
            &format!("/admin/assessments/{id}/questions/{question_id}/answers"),
            Some(json!({ "answerText": "Red", "description": "r", "imageUrl": "red.png" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let answers = assessment["questions"][0]["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["displayText"], "Red");
    let answer_id = id_of(&answers[0]);

    let (status, answer) = app
        .admin(
            Method::GET,
            &format!("/admin/assessments/{id}/questions/{question_id}/answers/{answer_id}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(answer["resultImage"], "red.png");

    // Editing without a new image keeps the old one.
    let (status, assessment) = app
        .admin(
            Method::PUT,
            &format!("/admin/assessments/{id}/questions/{question_id}/answers/{answer_id}"),
            Some(json!({ "answerText": "Crimson", "description": "c" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let answer = &assessment["questions"][0]["answers"][0];
    assert_eq!(answer["displayText"], "Crimson");
    assert_eq!(answer["resultImage"], "red.png");

    let (status, assessment) = app
        .admin(
            Method::PUT,
            &format!("/admin/assessments/{id}/questions/{question_id}/answers/{answer_id}"),
            Some(json!({ "answerText": "Crimson", "description": "c", "imageUrl": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assessment["questions"][0]["answers"][0]["resultImage"], "red.png");

    let (status, public) = app
        .send(Method::GET, &format!("/api/assessments/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(public, assessment);

    let (status, assessment) = app
        .admin(
            Method::DELETE,
            &format!("/admin/assessments/{id}/questions/{question_id}/answers/{answer_id}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(assessment["questions"][0]["answers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn edit_assessment_keeps_image_and_stamps_editor() {
    let app = test_app(AppConfig::default());
    let id = id_of(&app.create_assessment("Color Quiz").await);

    let (status, edited) = app
        .send(
            Method::PUT,
            &format!("/admin/assessments/{id}"),
            Some("editor-2"),
            Some(json!({ "name": "Colour Quiz", "description": "d2", "callToAction": "Go" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{edited}");
    assert_eq!(edited["imageUrl"], "x.png");
    assert_eq!(edited["shortUrl"], "colour-quiz");
    assert_eq!(edited["lastModifiedBy"], "editor-2");
    assert_eq!(edited["createdBy"], "admin-1");
}

#[tokio::test]
async fn admin_list_is_paginated_with_configured_size() {
    let config = AppConfig {
        assessment_admin_list_page_size: 2,
        ..AppConfig::default()
    };
    let app = test_app(config);
    for name in ["Charlie", "Alpha", "Bravo"] {
        app.create_assessment(name).await;
    }

    let (status, body) = app.admin(Method::GET, "/admin/assessments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pageSize"], 2);
    let pages = body["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0][0]["name"], "Alpha");
    assert_eq!(pages[0][1]["name"], "Bravo");
    assert_eq!(pages[1][0]["name"], "Charlie");

    let (_, public) = app.send(Method::GET, "/api/assessments", None, None).await;
    assert_eq!(public.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn missing_and_malformed_ids() {
    let app = test_app(AppConfig::default());

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/assessments/{}", uuid::Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::GET, "/api/assessments/not-a-uuid", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = id_of(&app.create_assessment("Color Quiz").await);
    let (status, body) = app
        .admin(
            Method::PUT,
            &format!("/admin/assessments/{id}/questions/{}", uuid::Uuid::new_v4()),
            Some(json!({ "questionText": "Q" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().starts_with("question not found"));

    // Malformed nested ids get the same JSON error body as a malformed
    // assessment id.
    let (status, body) = app
        .admin(
            Method::GET,
            &format!("/admin/assessments/{id}/questions/not-a-uuid"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid question id"));

    let (status, body) = app
        .admin(
            Method::DELETE,
            &format!(
                "/admin/assessments/{id}/questions/{}/answers/nope",
                uuid::Uuid::new_v4()
            ),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid answer id"));

    let (status, _) = app
        .admin(Method::DELETE, &format!("/admin/assessments/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .admin(Method::DELETE, &format!("/admin/assessments/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn participation_flow_counts_and_notifies_on_completion() {
    let config = AppConfig {
        send_emails_to_admins_on_completed_assessment: true,
        completed_assessment_address: "admins@example.com".to_string(),
        live_environment_url: "https://quiz.example.com".to_string(),
        ..AppConfig::default()
    };
    let mut app = test_app(config);

    let id = id_of(&app.create_assessment("Color Quiz").await);
    let (_, assessment) = app
        .admin(
            Method::POST,
            &format!("/admin/assessments/{id}/questions"),
            Some(json!({ "questionText": "Pick a color" })),
        )
        .await;
    let question_id = id_of(&assessment["questions"][0]);
    let (_, assessment) = app
        .admin(
            Method::POST,
            &format!("/admin/assessments/{id}/questions/{question_id}/answers"),
            Some(json!({ "answerText": "Red", "description": "Bold", "imageUrl": "red.png" })),
        )
        .await;
    let answer_id = id_of(&assessment["questions"][0]["answers"][0]);

    let (status, participation) = app
        .send(
            Method::POST,
            "/api/participations",
            None,
            Some(json!({
                "email": "sam@example.com",
                "assessmentId": id,
                "assessmentName": "Color Quiz"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(participation["completed"], false);
    let participation_id = id_of(&participation);

    let (status, participation) = app
        .send(
            Method::PUT,
            &format!("/api/participations/{participation_id}"),
            None,
            Some(json!({
                "questionId": question_id,
                "questionText": "Pick a color",
                "answerId": answer_id,
                "answerText": "Red",
                "resultDescription": "Bold",
                "resultImage": "red.png",
                "completed": true
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(participation["completed"], true);
    assert_eq!(participation["questionsAnswered"][0]["answerText"], "Red");

    // Delivered before the response, not left to a background task.
    let notice = app
        .notices
        .try_recv()
        .expect("completion notice delivered with the response");
    assert_eq!(notice.email, "sam@example.com");
    assert_eq!(notice.body_format, BodyFormat::Html);
    assert_eq!(notice.admin_address.as_deref(), Some("admins@example.com"));
    assert_eq!(
        notice.permalink,
        format!("https://quiz.example.com/participation/{participation_id}")
    );
    assert!(notice.thanks_body.contains("Red"));
    assert!(notice.thanks_body.contains("Contact us"));

    let (_, fetched) = app
        .send(
            Method::GET,
            &format!("/api/participations/{participation_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(fetched, participation);

    let (_, assessment) = app
        .send(Method::GET, &format!("/api/assessments/{id}"), None, None)
        .await;
    assert_eq!(assessment["startedCount"], 1);
    assert_eq!(assessment["completedCount"], 1);
    assert_eq!(assessment["questions"][0]["shownCount"], 1);
    assert_eq!(assessment["questions"][0]["answers"][0]["selectedCount"], 1);

}

#[tokio::test]
async fn answering_without_completion_sends_nothing() {
    let mut app = test_app(AppConfig {
        completed_assessment_html_emails: false,
        ..AppConfig::default()
    });
    let id = id_of(&app.create_assessment("Color Quiz").await);

    let (_, participation) = app
        .send(
            Method::POST,
            "/api/participations",
            None,
            Some(json!({ "email": "sam@example.com", "assessmentId": id, "assessmentName": "Color Quiz" })),
        )
        .await;
    let participation_id = id_of(&participation);

    // Answer ids that no longer exist in the assessment are still recorded.
    let (status, participation) = app
        .send(
            Method::PUT,
            &format!("/api/participations/{participation_id}"),
            None,
            Some(json!({
                "questionId": uuid::Uuid::new_v4(),
                "answerId": uuid::Uuid::new_v4(),
                "answerText": "Gone"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(participation["completed"], false);

    assert!(app.notices.try_recv().is_err(), "no notice expected");

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/participations/{}", uuid::Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
