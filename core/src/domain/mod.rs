//! Domain layer: entities and value objects

pub mod entities;
pub mod value_objects;

pub use entities::user::{NewAccount, UserAccount};
pub use value_objects::SessionTokens;
