//! Catalog algorithms
//!
//! Pure building blocks used by the catalog services: pagination math,
//! the view-growth estimator, friend-link ranking and the hot-term tracker.

pub mod friend_rank;
pub mod hot_terms;
pub mod pagination;
pub mod view_growth;

pub use friend_rank::{is_duplicate_url, normalize_url, rank_friend_links};
pub use hot_terms::{HotTermJob, HotTermTracker, majority_category};
pub use pagination::{PageRequest, TodayWindow, parse_query_int, total_pages};
pub use view_growth::{ViewBump, increment_bounds};
