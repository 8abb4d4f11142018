//! Service layer for business logic
//!
//! Catalog reads and friend-link management shared by the HTTP API, the
//! plugin registry and the CLI.

mod catalog_service;
mod friend_link_service;

pub use catalog_service::*;
pub use friend_link_service::*;
