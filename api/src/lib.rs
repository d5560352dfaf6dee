//! # API Layer
//!
//! Actix-web HTTP surface over the core authentication flow. The layer is
//! thin on purpose: request validation, client IP extraction, and the
//! mapping of domain outcomes to HTTP statuses all live here, while every
//! authentication decision is made by the core services.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use state::AppState;
