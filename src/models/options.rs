//! 比对选项
//!
//! `mode` / `includeFormatting` / `ocr` 在客户端有含义，其余算法调优字段原样透传给服务端

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 比对模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// 逐段落 HTML 结果
    LegacyHtml,
    /// 修订跟踪的 DOCX 结果
    #[default]
    DocxOoxml,
}

impl CompareMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareMode::LegacyHtml => "legacy_html",
            CompareMode::DocxOoxml => "docx_ooxml",
        }
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "legacy_html" | "legacy" => Ok(CompareMode::LegacyHtml),
            "docx_ooxml" | "ooxml" => Ok(CompareMode::DocxOoxml),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// 比对选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareOptions {
    #[serde(default)]
    pub mode: CompareMode,
    #[serde(rename = "includeFormatting", default = "default_include_formatting")]
    pub include_formatting: bool,
    #[serde(default)]
    pub ocr: bool,

    // --- 透传字段 ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shingle_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jaccard_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_move_span_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_brand_colors: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_word_automation: Option<bool>,
}

fn default_include_formatting() -> bool {
    true
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            mode: CompareMode::default(),
            include_formatting: default_include_formatting(),
            ocr: false,
            shingle_size: None,
            jaccard_threshold: None,
            min_move_span_tokens: None,
            force_brand_colors: None,
            use_word_automation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_options_serialize_without_passthrough_fields() {
        let value = serde_json::to_value(CompareOptions::default()).unwrap();
        assert_eq!(
            value,
            json!({"mode": "docx_ooxml", "includeFormatting": true, "ocr": false})
        );
    }

    #[test]
    fn test_passthrough_fields_are_forwarded() {
        let options = CompareOptions {
            mode: CompareMode::LegacyHtml,
            shingle_size: Some(7),
            jaccard_threshold: Some(0.42),
            force_brand_colors: Some(true),
            ..Default::default()
        };
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["mode"], "legacy_html");
        assert_eq!(value["shingle_size"], 7);
        assert_eq!(value["jaccard_threshold"], 0.42);
        assert_eq!(value["force_brand_colors"], true);
        assert!(value.get("use_word_automation").is_none());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("legacy-html".parse::<CompareMode>().unwrap(), CompareMode::LegacyHtml);
        assert_eq!("OOXML".parse::<CompareMode>().unwrap(), CompareMode::DocxOoxml);
        assert!("pdf".parse::<CompareMode>().is_err());
    }
}
