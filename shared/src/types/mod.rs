//! Common types shared across layers

pub mod response;

pub use response::AuthMode;
