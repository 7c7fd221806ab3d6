//! Identity domain
//!
//! Accounts, roles, and the read-only repository the auth core uses to
//! reach the data store.

mod entity;
mod repository;

pub use entity::{Identity, IdentityId, Role, UnknownRole};
pub use repository::IdentityRepository;

#[cfg(test)]
pub use repository::MockIdentityRepository;
