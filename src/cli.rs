//! 命令行参数

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::models::{CompareMode, CompareOptions, ExportKind};

/// 比对模式参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Legacy,
    Ooxml,
}

impl From<ModeArg> for CompareMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Legacy => CompareMode::LegacyHtml,
            ModeArg::Ooxml => CompareMode::DocxOoxml,
        }
    }
}

/// 导出类型参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportArg {
    Pdf,
    Docx,
}

impl From<ExportArg> for ExportKind {
    fn from(kind: ExportArg) -> Self {
        match kind {
            ExportArg::Pdf => ExportKind::Pdf,
            ExportArg::Docx => ExportKind::Docx,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "redline-client",
    version,
    about = "Compare two documents through the redline service and export the result"
)]
pub struct Cli {
    /// Original document
    #[arg(long)]
    pub original: PathBuf,

    /// Modified document
    #[arg(long)]
    pub modified: PathBuf,

    /// Comparison mode (defaults to the options file, then ooxml)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Export the result; may be repeated
    #[arg(long = "export", value_enum)]
    pub exports: Vec<ExportArg>,

    /// Run OCR on scanned pages
    #[arg(long)]
    pub ocr: bool,

    /// Ignore formatting-only changes
    #[arg(long)]
    pub no_formatting: bool,

    /// TOML file with comparison options (overrides COMPARE_OPTIONS_FILE)
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Output directory (overrides OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Service base URL (overrides COMPARE_API_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Check /health before comparing
    #[arg(long)]
    pub check_health: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 命令行参数覆盖文件中的选项
    pub fn apply_to(&self, mut options: CompareOptions) -> CompareOptions {
        if let Some(mode) = self.mode {
            options.mode = mode.into();
        }
        if self.ocr {
            options.ocr = true;
        }
        if self.no_formatting {
            options.include_formatting = false;
        }
        options
    }

    pub fn export_kinds(&self) -> Vec<ExportKind> {
        self.exports.iter().map(|k| (*k).into()).collect()
    }
}
