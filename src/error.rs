use thiserror::Error;

use crate::models::ExportKind;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 比对服务调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 响应结构不符合约定
    #[error("解析错误: {0}")]
    Decode(#[from] DecodeError),
    /// 导出失败（已解码为用户可读的消息）
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（无法连接、连接中断等）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务返回非 2xx 状态码
    ///
    /// `body` 保留原始字节，导出接口的错误体虽然是文本/JSON，但按二进制接收
    #[error("API返回错误状态 ({endpoint}): HTTP {status}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: Option<Vec<u8>>,
    },
    /// 响应体不是合法 JSON
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// 错误响应体（仅 `BadStatus` 携带）
    pub fn error_body(&self) -> Option<&[u8]> {
        match self {
            ApiError::BadStatus { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// 出错的接口路径
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::RequestFailed { endpoint, .. }
            | ApiError::BadStatus { endpoint, .. }
            | ApiError::JsonParseFailed { endpoint, .. } => endpoint,
        }
    }
}

/// 比对响应解析错误
#[derive(Debug, Error)]
pub enum DecodeError {
    /// 响应不是 JSON 对象
    #[error("比对响应不是 JSON 对象")]
    NotAnObject,
    /// legacy 响应缺少 paragraphs 数组
    #[error("legacy 比对响应缺少 paragraphs 数组")]
    MissingParagraphs,
    /// OOXML 文档不是合法的 base64
    #[error("OOXML 文档 base64 解码失败: {0}")]
    InvalidDocumentBytes(#[from] base64::DecodeError),
    /// 字段类型不符
    #[error("比对响应字段不符合约定: {0}")]
    Schema(#[from] serde_json::Error),
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 导出请求失败，`message` 为已解码的错误信息
    #[error("{kind} 导出失败: {message}")]
    Failed { kind: ExportKind, message: String },
    /// legacy DOCX 导出需要原始文件
    #[error("legacy DOCX 导出需要原始文件，但原始文件槽为空")]
    MissingOriginal,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 下载句柄不存在或已释放
    #[error("下载句柄 #{0} 不存在或已释放")]
    StaleHandle(u64),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 未知的比对模式
    #[error("未知的比对模式: {0}")]
    UnknownMode(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建导出失败错误
    pub fn export_failed(kind: ExportKind, message: impl Into<String>) -> Self {
        AppError::Export(ExportError::Failed {
            kind,
            message: message.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
