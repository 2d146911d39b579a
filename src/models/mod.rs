pub mod diff_result;
pub mod export;
pub mod loaders;
pub mod options;
pub mod upload;

pub use diff_result::{DiffResult, LegacyResult, OoxmlResult, ParagraphHtml, SharedResult, Stats};
pub use export::{
    DocxFromOoxmlPayload, ExportKind, ExportRequest, LegacyExportPayload, PdfFromDocxPayload,
};
pub use loaders::load_compare_options;
pub use options::{CompareMode, CompareOptions};
pub use upload::{SlotRole, UploadSlots, UploadedFile};
