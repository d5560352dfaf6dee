//! Tests for the authentication flow controller
