//! 导出流水线 - 业务能力层
//!
//! 根据结果变体和导出类型选择请求形态，发送请求，把产物交给下载目标。
//!
//! | 变体   | 类型 | 接口                      | 文件名         |
//! |--------|------|---------------------------|----------------|
//! | legacy | PDF  | `/export/pdf`             | `compare.pdf`  |
//! | legacy | DOCX | `/export/docx` multipart  | `compare.docx` |
//! | OOXML  | PDF  | `/export/pdf-from-docx`   | `redline.pdf`  |
//! | OOXML  | DOCX | `/export/docx-from-ooxml` | `redline.docx` |

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::CompareApi;
use crate::error::{AppError, AppResult, ExportError};
use crate::models::{
    CompareOptions, DiffResult, DocxFromOoxmlPayload, ExportKind, ExportRequest,
    LegacyExportPayload, PdfFromDocxPayload, UploadedFile,
};
use crate::services::download::{deliver, DownloadSink};
use crate::services::error_decoder::decode_export_error;

/// 产物文件名：legacy 结果为 `compare.*`，OOXML 结果为 `redline.*`
pub fn export_file_name(result: &DiffResult, kind: ExportKind) -> String {
    let stem = match result {
        DiffResult::Legacy(_) => "compare",
        DiffResult::Ooxml(_) => "redline",
    };
    format!("{}.{}", stem, kind.extension())
}

/// 选择请求形态
pub fn plan_export<'a>(
    result: &'a DiffResult,
    kind: ExportKind,
    original: Option<&'a UploadedFile>,
    options: &'a CompareOptions,
) -> AppResult<ExportRequest<'a>> {
    let request = match result {
        DiffResult::Legacy(r) => {
            let payload = LegacyExportPayload {
                diff_html_by_paragraph: r.paragraphs.iter().map(|p| p.html.as_str()).collect(),
                stats: &r.stats,
                meta: &r.meta,
            };
            match kind {
                ExportKind::Pdf => ExportRequest::LegacyPdf(payload),
                ExportKind::Docx => ExportRequest::LegacyDocx {
                    original: original.ok_or(ExportError::MissingOriginal)?,
                    payload,
                },
            }
        }
        DiffResult::Ooxml(r) => match kind {
            ExportKind::Pdf => ExportRequest::PdfFromDocx(PdfFromDocxPayload {
                docx_bytes_b64: &r.document_bytes,
                options,
            }),
            ExportKind::Docx => ExportRequest::DocxFromOoxml(DocxFromOoxmlPayload {
                docx_bytes_b64: &r.document_bytes,
            }),
        },
    };

    Ok(request)
}

/// 导出流水线
pub struct ExportPipeline {
    api: Arc<dyn CompareApi>,
    sink: Arc<dyn DownloadSink>,
}

impl ExportPipeline {
    pub fn new(api: Arc<dyn CompareApi>, sink: Arc<dyn DownloadSink>) -> Self {
        Self { api, sink }
    }

    /// 执行一次导出，返回下载位置
    ///
    /// 请求失败时错误体被解码为 [`ExportError::Failed`] 的消息
    pub async fn run(
        &self,
        result: &DiffResult,
        kind: ExportKind,
        original: Option<&UploadedFile>,
        options: &CompareOptions,
    ) -> AppResult<PathBuf> {
        let request = plan_export(result, kind, original, options)?;
        let endpoint = request.endpoint();
        let file_name = export_file_name(result, kind);

        info!("📤 正在导出 {} ({})...", kind, endpoint);

        let bytes = self.api.export(request).await.map_err(|e| {
            warn!("导出请求失败 ({}): {}", endpoint, e);
            AppError::export_failed(kind, decode_export_error(&e))
        })?;

        deliver(self.sink.as_ref(), &bytes, &file_name)
    }
}
