//! 预览渲染
//!
//! 所有来自服务端的段落 HTML 在插入预览前都经过清洗

use crate::models::DiffResult;
use crate::services::sanitizer::sanitize_html;
use crate::services::summary::Summary;

const PREVIEW_STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; font-size: 12pt; color: #111; }
    .summary { margin: 12px 0 24px; color: #333; font-size: 10pt; }
    .indicator { margin-bottom: 12px; font-weight: 600; }
    .paragraph { margin: 8px 0; line-height: 1.5; white-space: pre-wrap; }
    .diff-insert { color: #1e3a8a; }
    .diff-delete { color: #b91c1c; }
    .diff-move { color: #065f46; }
    .line-through { text-decoration: line-through; }
"#;

/// 预览内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// legacy：完整的 HTML 文档
    Html(String),
    /// OOXML：没有可渲染的 HTML，只能报告文档大小
    Document { encoded_len: usize },
}

/// 已清洗的段落 HTML（仅 legacy）
pub fn sanitized_paragraphs(result: &DiffResult) -> Option<Vec<String>> {
    match result {
        DiffResult::Legacy(r) => Some(r.paragraphs.iter().map(|p| sanitize_html(&p.html)).collect()),
        DiffResult::Ooxml(_) => None,
    }
}

/// 渲染预览
pub fn render_preview(result: &DiffResult) -> Preview {
    let Some(paragraphs) = sanitized_paragraphs(result) else {
        let encoded_len = match result {
            DiffResult::Ooxml(r) => r.document_bytes.len(),
            DiffResult::Legacy(_) => 0,
        };
        return Preview::Document { encoded_len };
    };

    let summary = Summary::from_stats(result.stats());
    let indicator = summary
        .indicator
        .map(|i| format!("<div class=\"indicator\">{}</div>", i))
        .unwrap_or_default();
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<div class=\"paragraph\">{}</div>", p))
        .collect();

    Preview::Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>Redline preview</title>\n<style>{}</style>\n</head>\n<body>\n{}<div class=\"summary\">{}</div>\n{}\n</body>\n</html>\n",
        PREVIEW_STYLE,
        indicator,
        summary.one_line(),
        body
    ))
}
