// crates/backend-lib/tests/http_api.rs
//! End-to-end tests driving the HTTP surface with an in-memory store.
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use signup_backend_lib::{
    config::Settings,
    error::AppError,
    notifier::Notifier,
    router::create_router,
    store::MemoryStore,
    AppState,
};

/// Test notifier that records deliveries so tests can recover the code.
#[derive(Clone, Default)]
struct CapturingNotifier {
    sent: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl CapturingNotifier {
    fn last_code(&self) -> String {
        self.sent.lock().unwrap().last().expect("a delivery").2.clone()
    }
}

#[async_trait]
impl Notifier for CapturingNotifier {
    async fn send(&self, to_email: &str, display_name: &str, code: &str) -> Result<(), AppError> {
        self.sent.lock().unwrap().push((
            to_email.to_string(),
            display_name.to_string(),
            code.to_string(),
        ));
        Ok(())
    }
}

/// Test notifier that always fails delivery.
struct BrokenNotifier;

#[async_trait]
impl Notifier for BrokenNotifier {
    async fn send(&self, _: &str, _: &str, _: &str) -> Result<(), AppError> {
        Err(AppError::NotificationFailed("smtp connection refused".to_string()))
    }
}

fn test_app(notifier: Arc<dyn Notifier>) -> Router {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::new(store, notifier, Settings::default()));
    create_router(state)
}

async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

#[tokio::test]
async fn test_full_signup_verify_signin_flow() {
    let notifier = CapturingNotifier::default();
    let app = test_app(Arc::new(notifier.clone()));

    // Signup
    let (status, body) = post_json(
        &app,
        "/signup",
        serde_json::json!({ "email": "a@x.com", "password": "pw1", "name": "Ann" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["message"],
        "Signup successful! Please check your email for the verification code."
    );

    let code = notifier.last_code();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    // Wrong code first: rejected, account stays pending
    let (status, body) = post_json(
        &app,
        "/verify",
        serde_json::json!({ "email": "a@x.com", "code": wrong }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid verification code");

    // Still pending, so signin with the right password reports that
    let (status, body) = post_json(
        &app,
        "/signin",
        serde_json::json!({ "email": "a@x.com", "password": "pw1" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["needsVerification"], true);

    // Right code: verified
    let (status, body) = post_json(
        &app,
        "/verify",
        serde_json::json!({ "email": "a@x.com", "code": code }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Account verified successfully!");

    // Signin succeeds with profile only
    let (status, body) = post_json(
        &app,
        "/signin",
        serde_json::json!({ "email": "a@x.com", "password": "pw1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Signin successful!");
    assert_eq!(body["user"]["name"], "Ann");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["user"].get("credential_hash").is_none());
    assert!(body["user"].get("verification_code").is_none());

    // Wrong password after verification
    let (status, body) = post_json(
        &app,
        "/signin",
        serde_json::json!({ "email": "a@x.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password.");
}

#[tokio::test]
async fn test_duplicate_signup_conflict() {
    let notifier = CapturingNotifier::default();
    let app = test_app(Arc::new(notifier));

    let signup = serde_json::json!({ "email": "a@x.com", "password": "pw1", "name": "Ann" });
    let (status, _) = post_json(&app, "/signup", signup.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/signup", signup).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User with this email already exists.");
}

#[tokio::test]
async fn test_verify_unknown_email_is_not_found() {
    let notifier = CapturingNotifier::default();
    let app = test_app(Arc::new(notifier));

    let (status, body) = post_json(
        &app,
        "/verify",
        serde_json::json!({ "email": "ghost@x.com", "code": "123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found. Please sign up first.");
}

#[tokio::test]
async fn test_signin_does_not_reveal_registration() {
    let notifier = CapturingNotifier::default();
    let app = test_app(Arc::new(notifier.clone()));

    let (status, _) = post_json(
        &app,
        "/signup",
        serde_json::json!({ "email": "a@x.com", "password": "pw1", "name": "Ann" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = post_json(
        &app,
        "/verify",
        serde_json::json!({ "email": "a@x.com", "code": notifier.last_code() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Unknown email and wrong password must be indistinguishable on the wire
    let (unknown_status, unknown_body) = post_json(
        &app,
        "/signin",
        serde_json::json!({ "email": "ghost@x.com", "password": "pw1" }),
    )
    .await;
    let (wrong_status, wrong_body) = post_json(
        &app,
        "/signin",
        serde_json::json!({ "email": "a@x.com", "password": "wrong" }),
    )
    .await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_signup_with_broken_notifier_is_500_but_account_persists() {
    let app = test_app(Arc::new(BrokenNotifier));

    let (status, body) = post_json(
        &app,
        "/signup",
        serde_json::json!({ "email": "a@x.com", "password": "pw1", "name": "Ann" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An internal server error occurred.");

    // The account was persisted before delivery failed, so a second signup
    // now conflicts rather than succeeding.
    let (status, _) = post_json(
        &app,
        "/signup",
        serde_json::json!({ "email": "a@x.com", "password": "pw1", "name": "Ann" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_malformed_email() {
    let notifier = CapturingNotifier::default();
    let app = test_app(Arc::new(notifier));

    let (status, body) = post_json(
        &app,
        "/signup",
        serde_json::json!({ "email": "not-an-email", "password": "pw1", "name": "Ann" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Invalid email"));
}
