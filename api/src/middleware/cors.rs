//! CORS configuration
//!
//! Development is permissive so local clients and emulators can talk to the
//! API; production restricts origins to the `ALLOWED_ORIGINS` list.

use std::env;

use actix_cors::Cors;
use actix_web::http::header;
use tracing::info;

/// Create a CORS middleware instance for the current environment
pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600usize);

    if environment == "production" {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(max_age)
}

fn create_production_cors(max_age: usize) -> Cors {
    info!("Configuring CORS for production environment");

    let allowed_origins = env::var("ALLOWED_ORIGINS").unwrap_or_default();

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(max_age);

    for origin in allowed_origins.split(',').filter(|o| !o.is_empty()) {
        cors = cors.allowed_origin(origin.trim());
    }

    cors
}
