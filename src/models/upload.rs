//! 上传槽位

use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 用户选择的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// 从磁盘读取文件
    pub async fn load(path: &Path) -> AppResult<Self> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.bin".to_string());

        debug!("已读取文件 {} ({} 字节)", file_name, bytes.len());

        Ok(Self::new(file_name, bytes))
    }
}

/// 根据扩展名推断 MIME 类型
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// 槽位角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Original,
    Modified,
}

/// 两个固定槽位，重新选择时整体替换
#[derive(Debug, Clone, Default)]
pub struct UploadSlots {
    pub original: Option<Arc<UploadedFile>>,
    pub modified: Option<Arc<UploadedFile>>,
}

impl UploadSlots {
    pub fn select(&mut self, role: SlotRole, file: UploadedFile) {
        let file = Some(Arc::new(file));
        match role {
            SlotRole::Original => self.original = file,
            SlotRole::Modified => self.modified = file,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.original.is_some() && self.modified.is_some()
    }

    /// 两个槽位都已选择时返回文件对
    pub fn pair(&self) -> Option<(Arc<UploadedFile>, Arc<UploadedFile>)> {
        match (&self.original, &self.modified) {
            (Some(o), Some(m)) => Some((o.clone(), m.clone())),
            _ => None,
        }
    }
}
