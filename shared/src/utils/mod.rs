//! Utility functions shared across layers

pub mod phone;
