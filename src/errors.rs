use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum CatalogError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Serialization(String),
    PluginInit(String),
}

impl CatalogError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::DatabaseConfig(_) => "E001",
            CatalogError::DatabaseConnection(_) => "E002",
            CatalogError::DatabaseOperation(_) => "E003",
            CatalogError::FileOperation(_) => "E004",
            CatalogError::Validation(_) => "E005",
            CatalogError::NotFound(_) => "E006",
            CatalogError::Conflict(_) => "E007",
            CatalogError::Unauthorized(_) => "E008",
            CatalogError::Serialization(_) => "E009",
            CatalogError::PluginInit(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CatalogError::DatabaseConfig(_) => "Database Configuration Error",
            CatalogError::DatabaseConnection(_) => "Database Connection Error",
            CatalogError::DatabaseOperation(_) => "Database Operation Error",
            CatalogError::FileOperation(_) => "File Operation Error",
            CatalogError::Validation(_) => "Validation Error",
            CatalogError::NotFound(_) => "Resource Not Found",
            CatalogError::Conflict(_) => "Conflict",
            CatalogError::Unauthorized(_) => "Unauthorized",
            CatalogError::Serialization(_) => "Serialization Error",
            CatalogError::PluginInit(_) => "Plugin Initialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            CatalogError::DatabaseConfig(msg)
            | CatalogError::DatabaseConnection(msg)
            | CatalogError::DatabaseOperation(msg)
            | CatalogError::FileOperation(msg)
            | CatalogError::Validation(msg)
            | CatalogError::NotFound(msg)
            | CatalogError::Conflict(msg)
            | CatalogError::Unauthorized(msg)
            | CatalogError::Serialization(msg)
            | CatalogError::PluginInit(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    ///
    /// 校验失败和重复提交都按 400 处理，存储层错误一律 500。
    pub fn http_status(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) | CatalogError::Conflict(_) => StatusCode::BAD_REQUEST,
            CatalogError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CatalogError {}

// 便捷的构造函数
impl CatalogError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        CatalogError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CatalogError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CatalogError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        CatalogError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CatalogError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CatalogError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        CatalogError::Conflict(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        CatalogError::Unauthorized(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        CatalogError::Serialization(msg.into())
    }

    pub fn plugin_init<T: Into<String>>(msg: T) -> Self {
        CatalogError::PluginInit(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        CatalogError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
