//! 下载服务 - 业务能力层
//!
//! 导出得到的二进制产物先落到一个临时句柄上，用一次触发下载，然后立即释放。
//! [`ScopedDownload`] 在 `Drop` 中释放句柄，任何退出路径都不会泄漏。

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, FileError};

/// 临时下载句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(pub u64);

/// 下载目标
///
/// `create_handle` / `release` 必须成对调用，由 [`ScopedDownload`] 保证
pub trait DownloadSink: Send + Sync {
    /// 为产物创建临时句柄
    fn create_handle(&self, bytes: &[u8]) -> AppResult<HandleId>;

    /// 使用句柄触发下载，返回最终位置
    fn trigger(&self, handle: HandleId, file_name: &str) -> AppResult<PathBuf>;

    /// 释放句柄
    fn release(&self, handle: HandleId);
}

/// 作用域内的下载句柄
pub struct ScopedDownload<'a> {
    sink: &'a dyn DownloadSink,
    handle: HandleId,
}

impl<'a> ScopedDownload<'a> {
    pub fn acquire(sink: &'a dyn DownloadSink, bytes: &[u8]) -> AppResult<Self> {
        let handle = sink.create_handle(bytes)?;
        Ok(Self { sink, handle })
    }

    /// 触发下载，句柄只能使用一次
    pub fn trigger(self, file_name: &str) -> AppResult<PathBuf> {
        self.sink.trigger(self.handle, file_name)
    }
}

impl Drop for ScopedDownload<'_> {
    fn drop(&mut self) {
        self.sink.release(self.handle);
    }
}

/// 把产物交付给下载目标
pub fn deliver(sink: &dyn DownloadSink, bytes: &[u8], file_name: &str) -> AppResult<PathBuf> {
    ScopedDownload::acquire(sink, bytes)?.trigger(file_name)
}

/// 写入本地目录的下载目标
///
/// 句柄对应输出目录下的 `.part` 临时文件，触发时复制为最终文件名，释放时删除临时文件
pub struct FileDownloadSink {
    output_dir: PathBuf,
    next_id: AtomicU64,
    staged: Mutex<HashMap<HandleId, PathBuf>>,
}

impl FileDownloadSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            next_id: AtomicU64::new(1),
            staged: Mutex::new(HashMap::new()),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 当前未释放的句柄数量
    pub fn open_handles(&self) -> usize {
        self.staged.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn staged_path(&self, handle: HandleId) -> AppResult<PathBuf> {
        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&handle)
            .cloned()
            .ok_or_else(|| FileError::StaleHandle(handle.0).into())
    }
}

impl DownloadSink for FileDownloadSink {
    fn create_handle(&self, bytes: &[u8]) -> AppResult<HandleId> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        let handle = HandleId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let path = self.output_dir.join(format!(".download-{}.part", handle.0));

        fs::write(&path, bytes)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        debug!("创建下载句柄 #{} -> {}", handle.0, path.display());

        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle, path);

        Ok(handle)
    }

    fn trigger(&self, handle: HandleId, file_name: &str) -> AppResult<PathBuf> {
        let staged = self.staged_path(handle)?;
        let target = self.output_dir.join(file_name);

        fs::copy(&staged, &target)
            .map_err(|e| AppError::file_write_failed(target.display().to_string(), e))?;

        info!("✓ 已下载: {}", target.display());

        Ok(target)
    }

    fn release(&self, handle: HandleId) {
        let staged = self
            .staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle);

        match staged {
            Some(path) => {
                if let Err(e) = fs::remove_file(&path) {
                    warn!("释放下载句柄 #{} 时删除临时文件失败: {}", handle.0, e);
                } else {
                    debug!("释放下载句柄 #{}", handle.0);
                }
            }
            None => warn!("重复释放下载句柄 #{}", handle.0),
        }
    }
}
