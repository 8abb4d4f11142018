//! API 模块常量定义

/// 共享密钥请求头
pub const TOKEN_HEADER: &str = "X-Token";

/// 所有接口共用的前缀
pub const API_PREFIX: &str = "/api";
