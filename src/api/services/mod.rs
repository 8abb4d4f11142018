pub mod catalog;
pub mod health;
pub mod search;

pub use catalog::catalog_routes;
pub use health::{HealthService, health_routes};
pub use search::{SearchService, search_routes};
