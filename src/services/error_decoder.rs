//! 导出错误解码 - 业务能力层
//!
//! 导出请求按二进制接收响应，失败时服务端返回的文本/JSON 错误体也是字节，
//! 这里把它还原成可展示的文本。解码失败不会向上抛出，统一回退到固定提示。

use tracing::warn;

use crate::error::ApiError;

/// 无法解读错误体时展示的固定提示
pub const EXPORT_FALLBACK_MESSAGE: &str =
    "导出失败：可能无法连接到比对服务。请确认后端已启动，并检查 COMPARE_API_BASE_URL 配置后重试。";

/// 解码错误体
///
/// - 有错误体且是合法 UTF-8 文本：原样返回
/// - 没有错误体、错误体为空白、或解码失败：返回 [`EXPORT_FALLBACK_MESSAGE`]
pub fn decode_error_body(body: Option<&[u8]>) -> String {
    let Some(bytes) = body else {
        return EXPORT_FALLBACK_MESSAGE.to_string();
    };

    match std::str::from_utf8(bytes) {
        Ok(text) if !text.trim().is_empty() => text.to_string(),
        Ok(_) => EXPORT_FALLBACK_MESSAGE.to_string(),
        Err(e) => {
            warn!("导出错误体无法按文本解码 ({} 字节): {}", bytes.len(), e);
            EXPORT_FALLBACK_MESSAGE.to_string()
        }
    }
}

/// 从 API 错误中提取用户可读的消息
pub fn decode_export_error(error: &ApiError) -> String {
    decode_error_body(error.error_body())
}
