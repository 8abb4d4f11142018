//! Catalog API 服务模块
//!
//! 该模块包含共享密钥保护下的所有目录端点，包括：
//! - 分类与热搜词
//! - 资源列表、详情、随机与热门
//! - 友链列表与提交

mod categories;
pub mod error_code;
mod friend_links;
mod helpers;
mod resources;
pub mod routes;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{error_from_catalog, error_response, json_response, success_response};

// 重新导出错误码
pub use error_code::ErrorCode;

pub use categories::get_categories;
pub use friend_links::{get_friend_links, post_friend_link};
pub use resources::{get_hot_resources, get_random_resources, get_resource, get_resources};
pub use routes::catalog_routes;
