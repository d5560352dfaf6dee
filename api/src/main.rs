//! Service entry point
//!
//! Wires Redis, MySQL, the SMS gateway, and the JWT issuer into the core
//! authentication flow and serves it over HTTP.

use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use oa_core::services::auth::AuthService;
use oa_core::services::{LockoutService, OtpService, SignupTokenService};
use oa_infra::auth::JwtSessionIssuer;
use oa_infra::cache::RedisStore;
use oa_infra::database::{create_pool, MySqlUserRepository};
use oa_infra::sms::{create_sms_gateway, BestEffortSender, SmsConfig};
use oa_shared::config::{
    CacheConfig, DatabaseConfig, JwtConfig, LockoutConfig, OtpConfig, ServerConfig,
};

use oa_api::routes;
use oa_api::state::AppState;

type ProdState = AppState<RedisStore, MySqlUserRepository, BestEffortSender, JwtSessionIssuer>;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting phone authentication service");

    let server_config = ServerConfig::from_env();
    let cache_config = CacheConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let otp_config = OtpConfig::from_env();
    let lockout_config = LockoutConfig::from_env();
    let jwt_config = JwtConfig::from_env();
    let sms_config = SmsConfig::from_env();

    let cache = Arc::new(
        RedisStore::connect(&cache_config)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
    );

    let pool = create_pool(&database_config)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool));
    let sender = Arc::new(BestEffortSender::new(create_sms_gateway(&sms_config)));
    let otp_service = Arc::new(OtpService::new(
        Arc::clone(&cache),
        sender,
        otp_config.clone(),
    ));
    let signup_tokens = Arc::new(SignupTokenService::new(Arc::clone(&cache), otp_config));
    let lockout = Arc::new(LockoutService::new(Arc::clone(&cache), lockout_config));
    let session_issuer = Arc::new(JwtSessionIssuer::new(jwt_config));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        otp_service,
        signup_tokens,
        lockout,
        session_issuer,
    ));

    let state: web::Data<ProdState> = web::Data::new(AppState::new(auth_service));

    let bind_address = server_config.bind_address();
    info!("Listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(oa_api::middleware::cors::create_cors())
            .app_data(state.clone())
            .configure(
                routes::auth::configure::<
                    RedisStore,
                    MySqlUserRepository,
                    BestEffortSender,
                    JwtSessionIssuer,
                >,
            )
            .route("/health", web::get().to(health))
    })
    .bind(&bind_address)?
    .run()
    .await
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
