//! End-to-end HTTP tests for the authentication flow
//!
//! The full route stack runs against in-memory implementations of the
//! cache and the user repository, a recording SMS gateway, and the real
//! JWT issuer.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use oa_api::routes;
use oa_api::state::AppState;
use oa_core::cache::{CacheStore, InMemoryCache};
use oa_core::repositories::MockUserRepository;
use oa_core::services::auth::AuthService;
use oa_core::services::{LockoutService, OtpService, SignupTokenService};
use oa_infra::auth::JwtSessionIssuer;
use oa_infra::sms::{BestEffortSender, MockSmsGateway, SmsGateway};
use oa_shared::config::{JwtConfig, LockoutConfig, OtpConfig};

const PHONE: &str = "+989121234567";

struct TestHarness {
    state:
        web::Data<AppState<InMemoryCache, MockUserRepository, BestEffortSender, JwtSessionIssuer>>,
    cache: Arc<InMemoryCache>,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_users(MockUserRepository::new())
    }

    fn with_users(users: MockUserRepository) -> Self {
        let cache = Arc::new(InMemoryCache::new());
        let gateway: Arc<dyn SmsGateway> = Arc::new(MockSmsGateway::new());
        let sender = Arc::new(BestEffortSender::new(gateway));

        let otp_config = OtpConfig::default();
        let otp_service = Arc::new(OtpService::new(
            Arc::clone(&cache),
            sender,
            otp_config.clone(),
        ));
        let signup_tokens = Arc::new(SignupTokenService::new(Arc::clone(&cache), otp_config));
        let lockout = Arc::new(LockoutService::new(
            Arc::clone(&cache),
            LockoutConfig::default(),
        ));
        let session_issuer = Arc::new(JwtSessionIssuer::new(JwtConfig::default()));

        let auth_service = Arc::new(AuthService::new(
            Arc::new(users),
            otp_service,
            signup_tokens,
            lockout,
            session_issuer,
        ));

        Self {
            state: web::Data::new(AppState::new(auth_service)),
            cache,
        }
    }

    /// Read the live OTP straight out of the cache
    async fn issued_code(&self) -> String {
        self.cache
            .get(&format!("otp_{}", PHONE))
            .await
            .unwrap()
            .expect("no OTP in cache")
    }
}

macro_rules! test_app {
    ($harness:expr) => {
        test::init_service(
            App::new().app_data($harness.state.clone()).configure(
                routes::auth::configure::<
                    InMemoryCache,
                    MockUserRepository,
                    BestEffortSender,
                    JwtSessionIssuer,
                >,
            ),
        )
        .await
    };
}

macro_rules! post {
    ($app:expr, $path:expr, $body:expr) => {{
        let request = test::TestRequest::post()
            .uri($path)
            .set_json(&$body)
            .to_request();
        let response = test::call_service(&$app, request).await;
        let status = response.status();
        let body: Value = test::read_body_json(response).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_full_signup_flow() {
    let harness = TestHarness::new();
    let app = test_app!(harness);

    let (status, body) = post!(app, "/api/v1/auth/start", json!({ "phone": PHONE }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "signup");

    let code = harness.issued_code().await;
    let (status, body) = post!(
        app,
        "/api/v1/auth/verify-otp",
        json!({ "phone": PHONE, "otp": code })
    );
    assert_eq!(status, StatusCode::OK);
    let tmp_token = body["tmp_token"].as_str().unwrap().to_string();

    let (status, body) = post!(
        app,
        "/api/v1/auth/complete-signup",
        json!({
            "tmp_token": tmp_token,
            "first_name": "Sara",
            "last_name": "Ahmadi",
            "email": "sara@example.com",
            "password": "correct-horse-battery"
        })
    );
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["access"].as_str().unwrap().contains('.'));
    assert!(body["refresh"].as_str().unwrap().contains('.'));
}

#[actix_web::test]
async fn test_second_otp_request_is_rate_gated() {
    let harness = TestHarness::new();
    let app = test_app!(harness);

    let (status, _) = post!(app, "/api/v1/auth/start", json!({ "phone": PHONE }));
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post!(app, "/api/v1/auth/start", json!({ "phone": PHONE }));
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_registered_phone_is_routed_to_login() {
    let hash = bcrypt::hash("some-password", 4).unwrap();
    let harness = TestHarness::with_users(MockUserRepository::with_existing_account(PHONE, &hash));
    let app = test_app!(harness);

    let (status, body) = post!(app, "/api/v1/auth/start", json!({ "phone": PHONE }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "login");
}

#[actix_web::test]
async fn test_wrong_otp_answers_unauthorized_then_forbidden() {
    let harness = TestHarness::new();
    let app = test_app!(harness);

    let _ = post!(app, "/api/v1/auth/start", json!({ "phone": PHONE }));
    let code = harness.issued_code().await;
    let wrong = if code == "000000" { "000001" } else { "000000" };

    for _ in 0..2 {
        let (status, _) = post!(
            app,
            "/api/v1/auth/verify-otp",
            json!({ "phone": PHONE, "otp": wrong })
        );
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // The third failure trips the lockout
    let (status, _) = post!(
        app,
        "/api/v1/auth/verify-otp",
        json!({ "phone": PHONE, "otp": wrong })
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_missing_otp_answers_gone() {
    let harness = TestHarness::new();
    let app = test_app!(harness);

    let (status, _) = post!(
        app,
        "/api/v1/auth/verify-otp",
        json!({ "phone": PHONE, "otp": "123456" })
    );
    assert_eq!(status, StatusCode::GONE);
}

#[actix_web::test]
async fn test_signup_token_is_single_use() {
    let harness = TestHarness::new();
    let app = test_app!(harness);

    let _ = post!(app, "/api/v1/auth/start", json!({ "phone": PHONE }));
    let code = harness.issued_code().await;
    let (_, body) = post!(
        app,
        "/api/v1/auth/verify-otp",
        json!({ "phone": PHONE, "otp": code })
    );
    let tmp_token = body["tmp_token"].as_str().unwrap().to_string();

    let signup_body = json!({
        "tmp_token": tmp_token,
        "first_name": "Sara",
        "last_name": "Ahmadi",
        "email": "sara@example.com",
        "password": "correct-horse-battery"
    });

    let (status, _) = post!(app, "/api/v1/auth/complete-signup", signup_body.clone());
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post!(app, "/api/v1/auth/complete-signup", signup_body);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_round_trip() {
    let hash = bcrypt::hash("right-password", 4).unwrap();
    let harness = TestHarness::with_users(MockUserRepository::with_existing_account(PHONE, &hash));
    let app = test_app!(harness);

    let (status, _) = post!(
        app,
        "/api/v1/auth/login",
        json!({ "phone": PHONE, "password": "wrong-password" })
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = post!(
        app,
        "/api/v1/auth/login",
        json!({ "phone": PHONE, "password": "right-password" })
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].as_str().unwrap().contains('.'));
}

#[actix_web::test]
async fn test_malformed_payload_is_rejected_before_the_flow() {
    let harness = TestHarness::new();
    let app = test_app!(harness);

    // OTP of the wrong length never reaches the core services
    let (status, _) = post!(
        app,
        "/api/v1/auth/verify-otp",
        json!({ "phone": PHONE, "otp": "12" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post!(app, "/api/v1/auth/start", json!({ "phone": "abc" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
