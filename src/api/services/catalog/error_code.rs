//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::CatalogError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 共享密钥错误
/// - 3000-3099: 资源错误
/// - 4000-4099: 友链错误
/// - 5000-5099: 分类错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    InvalidTimestamp = 1012,

    // 共享密钥错误 2000-2099
    TokenMissing = 2000,
    TokenInvalid = 2001,

    // 资源错误 3000-3099
    ResourceNotFound = 3000,
    ResourceQueryFailed = 3001,

    // 友链错误 4000-4099
    FriendLinkInvalid = 4000,
    FriendLinkDuplicate = 4001,
    FriendLinkNotFound = 4002,
    FriendLinkWriteFailed = 4003,

    // 分类错误 5000-5099
    CategoryQueryFailed = 5000,
}

impl From<&CatalogError> for ErrorCode {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::Validation(_) | CatalogError::Conflict(_) => ErrorCode::BadRequest,
            CatalogError::NotFound(_) => ErrorCode::NotFound,
            CatalogError::Unauthorized(_) => ErrorCode::Unauthorized,
            _ => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(
            serde_json::to_string(&ErrorCode::FriendLinkDuplicate).unwrap(),
            "4001"
        );
    }

    #[test]
    fn test_from_catalog_error() {
        assert_eq!(
            ErrorCode::from(&CatalogError::validation("x")),
            ErrorCode::BadRequest
        );
        assert_eq!(
            ErrorCode::from(&CatalogError::database_operation("x")),
            ErrorCode::InternalServerError
        );
    }
}
