//! 响应归一化 - 业务能力层
//!
//! 服务端的比对响应没有类型标签，只能按字段判定变体。
//! 判定规则集中在 [`classify`]，新增第三种响应形态时只需修改这里。

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::DecodeError;
use crate::models::{DiffResult, LegacyResult, OoxmlResult};

/// OOXML 响应独有的字段，任一出现即判定为 OOXML 变体
///
/// 服务端当前返回 `docx_bytes_b64`，`documentBytes` 是同一字段的驼峰写法
pub const OOXML_MARKER_FIELDS: &[&str] = &["docx_bytes_b64", "documentBytes"];

/// legacy 响应必须携带的段落数组
pub const LEGACY_PARAGRAPHS_FIELD: &str = "paragraphs";

/// 响应形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Legacy,
    Ooxml,
}

/// 按字段存在性判定响应形态
///
/// 只看 OOXML 标记字段是否存在（不看取值），其余字段一律不参与判定
pub fn classify(body: &Map<String, Value>) -> ResponseShape {
    if OOXML_MARKER_FIELDS.iter().any(|field| body.contains_key(*field)) {
        ResponseShape::Ooxml
    } else {
        ResponseShape::Legacy
    }
}

/// 将原始比对响应转换为 [`DiffResult`]
pub fn normalize(raw: Value) -> Result<DiffResult, DecodeError> {
    let Value::Object(mut body) = raw else {
        return Err(DecodeError::NotAnObject);
    };

    match classify(&body) {
        ResponseShape::Ooxml => {
            // OOXML 变体忽略其余字段（例如同时出现的 paragraphs）
            body.remove(LEGACY_PARAGRAPHS_FIELD);
            // 两种写法同时出现时以靠前的为准
            let mut markers = OOXML_MARKER_FIELDS.iter().filter(|f| body.contains_key(**f));
            markers.next();
            let shadowed: Vec<&str> = markers.copied().collect();
            for field in shadowed {
                body.remove(field);
            }
            let result: OoxmlResult = serde_json::from_value(Value::Object(body))?;
            let decoded = STANDARD.decode(result.document_bytes.as_bytes())?;
            debug!("比对响应判定为 OOXML 变体，文档 {} 字节", decoded.len());
            Ok(DiffResult::Ooxml(result))
        }
        ResponseShape::Legacy => {
            if !body.get(LEGACY_PARAGRAPHS_FIELD).is_some_and(Value::is_array) {
                return Err(DecodeError::MissingParagraphs);
            }
            let result: LegacyResult = serde_json::from_value(Value::Object(body))?;
            debug!(
                "比对响应判定为 legacy 变体，共 {} 个段落",
                result.paragraphs.len()
            );
            Ok(DiffResult::Legacy(result))
        }
    }
}
