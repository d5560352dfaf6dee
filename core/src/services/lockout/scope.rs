//! Lockout accounting scopes
//!
//! A scope is the unit of failure accounting: a (flow, dimension, value)
//! triple such as `signup:user:+989121234567` or `login:ip:203.0.113.9`.
//! Splitting by dimension defends independently against one attacker
//! hammering a single victim's phone from rotating addresses and against a
//! single address spraying many phone numbers.

use std::fmt;

/// Which authentication flow the attempt belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Signup,
    Login,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::Signup => "signup",
            Flow::Login => "login",
        }
    }
}

/// Which request property the scope counts by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Normalized phone number
    User,
    /// Client IP address
    Ip,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::User => "user",
            Dimension::Ip => "ip",
        }
    }
}

/// A single lockout accounting scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub flow: Flow,
    pub dimension: Dimension,
    pub value: String,
}

impl Scope {
    pub fn user(flow: Flow, phone: &str) -> Self {
        Self {
            flow,
            dimension: Dimension::User,
            value: phone.to_string(),
        }
    }

    pub fn ip(flow: Flow, ip: &str) -> Self {
        Self {
            flow,
            dimension: Dimension::Ip,
            value: ip.to_string(),
        }
    }

    /// Cache key for this scope's failure counter
    pub fn counter_key(&self) -> String {
        self.to_string()
    }

    /// Cache key for this scope's lock marker
    pub fn lock_key(&self) -> String {
        format!("lock:{}", self)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.flow.as_str(),
            self.dimension.as_str(),
            self.value
        )
    }
}
