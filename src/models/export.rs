//! 导出请求
//!
//! 四种请求形态由 (结果变体, 导出类型) 决定，见 `services::export_pipeline::plan_export`

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::models::diff_result::Stats;
use crate::models::options::CompareOptions;
use crate::models::upload::UploadedFile;

/// 导出类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Pdf,
    Docx,
}

impl ExportKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportKind::Pdf => "pdf",
            ExportKind::Docx => "docx",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Pdf => f.write_str("PDF"),
            ExportKind::Docx => f.write_str("DOCX"),
        }
    }
}

/// legacy 导出的 JSON 负载
#[derive(Debug, Clone, Serialize)]
pub struct LegacyExportPayload<'a> {
    #[serde(rename = "diffHtmlByParagraph")]
    pub diff_html_by_paragraph: Vec<&'a str>,
    pub stats: &'a Stats,
    pub meta: &'a Map<String, Value>,
}

/// `/export/pdf-from-docx` 负载
#[derive(Debug, Clone, Serialize)]
pub struct PdfFromDocxPayload<'a> {
    pub docx_bytes_b64: &'a str,
    pub options: &'a CompareOptions,
}

/// `/export/docx-from-ooxml` 负载
#[derive(Debug, Clone, Serialize)]
pub struct DocxFromOoxmlPayload<'a> {
    pub docx_bytes_b64: &'a str,
}

/// 导出请求
#[derive(Debug, Clone)]
pub enum ExportRequest<'a> {
    /// legacy + PDF：JSON
    LegacyPdf(LegacyExportPayload<'a>),
    /// legacy + DOCX：multipart，附带原始文件
    LegacyDocx {
        original: &'a UploadedFile,
        payload: LegacyExportPayload<'a>,
    },
    /// OOXML + PDF
    PdfFromDocx(PdfFromDocxPayload<'a>),
    /// OOXML + DOCX
    DocxFromOoxml(DocxFromOoxmlPayload<'a>),
}

impl ExportRequest<'_> {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ExportRequest::LegacyPdf(_) => "/export/pdf",
            ExportRequest::LegacyDocx { .. } => "/export/docx",
            ExportRequest::PdfFromDocx(_) => "/export/pdf-from-docx",
            ExportRequest::DocxFromOoxml(_) => "/export/docx-from-ooxml",
        }
    }
}
