//! Authentication infrastructure - JWT session credential issuance

mod jwt_issuer;

pub use jwt_issuer::{JwtSessionIssuer, SessionClaims};
