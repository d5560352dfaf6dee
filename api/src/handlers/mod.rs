//! Error translation between the domain and HTTP

pub mod error;

pub use error::ApiError;
