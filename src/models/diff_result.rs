//! 比对结果
//!
//! 服务端不发送类型标签，变体由 `services::normalizer` 按字段判定

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// 统计信息
///
/// `total` 由服务端给出，不保证等于其余三项之和
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub insertions: u64,
    pub deletions: u64,
    pub moves: u64,
    pub total: u64,
}

/// 单个段落的 redline HTML（未经清洗）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphHtml {
    pub html: String,
}

/// legacy 模式结果
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyResult {
    pub paragraphs: Vec<ParagraphHtml>,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

/// OOXML 模式结果
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OoxmlResult {
    /// base64 编码的修订跟踪文档，导出时原样回传
    #[serde(rename = "docx_bytes_b64", alias = "documentBytes")]
    pub document_bytes: String,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

/// 比对结果
#[derive(Debug, Clone, PartialEq)]
pub enum DiffResult {
    Legacy(LegacyResult),
    Ooxml(OoxmlResult),
}

impl DiffResult {
    pub fn stats(&self) -> &Stats {
        match self {
            DiffResult::Legacy(r) => &r.stats,
            DiffResult::Ooxml(r) => &r.stats,
        }
    }

    pub fn meta(&self) -> &Map<String, Value> {
        match self {
            DiffResult::Legacy(r) => &r.meta,
            DiffResult::Ooxml(r) => &r.meta,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            DiffResult::Legacy(_) => "legacy",
            DiffResult::Ooxml(_) => "ooxml",
        }
    }
}

/// 控制器持有的共享结果，只整体替换，不原地修改
pub type SharedResult = Arc<DiffResult>;
