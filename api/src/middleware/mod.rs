//! HTTP middleware configuration

pub mod cors;
