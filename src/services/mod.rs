pub mod download;
pub mod error_decoder;
pub mod export_pipeline;
pub mod normalizer;
pub mod preview;
pub mod sanitizer;
pub mod summary;

pub use download::{deliver, DownloadSink, FileDownloadSink, HandleId, ScopedDownload};
pub use error_decoder::{decode_error_body, decode_export_error, EXPORT_FALLBACK_MESSAGE};
pub use export_pipeline::{export_file_name, plan_export, ExportPipeline};
pub use normalizer::{classify, normalize, ResponseShape, OOXML_MARKER_FIELDS};
pub use preview::{render_preview, sanitized_paragraphs, Preview};
pub use sanitizer::sanitize_html;
pub use summary::{Summary, SummaryIndicator, OVERLOAD_THRESHOLD};
