//! 工作流控制器 - 流程层
//!
//! 核心职责：把上传槽位、比对选项、比对请求、结果归一化和导出流水线串起来
//!
//! 状态迁移见 [`WorkflowState`]：
//! 1. Idle → Comparing → Ready
//! 2. Ready → Exporting(PDF | DOCX) → Ready
//!
//! 所有方法都以 `&self` 调用，在单一逻辑线程上协作执行：状态锁只在同步片段内持有，
//! 永远不跨越 `.await`。在途时再次触发同一操作是空操作，不排队。
//! 请求没有超时也不可取消，服务端不响应时控制器会一直停在在途状态。

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::clients::CompareApi;
use crate::error::{AppError, AppResult, ExportError};
use crate::models::{CompareOptions, ExportKind, SharedResult, SlotRole, UploadSlots, UploadedFile};
use crate::services::download::DownloadSink;
use crate::services::export_pipeline::ExportPipeline;
use crate::services::normalizer::normalize;
use crate::services::preview::{render_preview, Preview};
use crate::services::summary::Summary;
use crate::workflow::notice::{Notifier, UserAction, UserNotice};
use crate::workflow::state::{Phase, WorkflowState};

/// 比对处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 比对完成，结果已替换
    Success,
    /// 守卫不满足，未发出请求
    Skipped,
}

/// 导出处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// 已下载到指定位置
    Downloaded(PathBuf),
    /// 守卫不满足，未发出请求
    Skipped,
}

struct Session {
    slots: UploadSlots,
    options: CompareOptions,
    state: WorkflowState,
    /// 产生当前结果的原始文件，legacy DOCX 导出时附带
    compared_original: Option<Arc<UploadedFile>>,
}

/// 工作流控制器
pub struct WorkflowController {
    api: Arc<dyn CompareApi>,
    pipeline: ExportPipeline,
    notifier: Arc<dyn Notifier>,
    session: Mutex<Session>,
}

impl WorkflowController {
    /// 创建新的工作流控制器
    pub fn new(
        api: Arc<dyn CompareApi>,
        sink: Arc<dyn DownloadSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pipeline: ExportPipeline::new(api.clone(), sink),
            api,
            notifier,
            session: Mutex::new(Session {
                slots: UploadSlots::default(),
                options: CompareOptions::default(),
                state: WorkflowState::default(),
                compared_original: None,
            }),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== 输入 ==========

    /// 选择文件，整体替换对应槽位
    pub fn select_file(&self, role: SlotRole, file: UploadedFile) {
        debug!("选择文件 {:?}: {}", role, file.file_name);
        self.session().slots.select(role, file);
    }

    pub fn select_original(&self, file: UploadedFile) {
        self.select_file(SlotRole::Original, file);
    }

    pub fn select_modified(&self, file: UploadedFile) {
        self.select_file(SlotRole::Modified, file);
    }

    pub fn set_options(&self, options: CompareOptions) {
        self.session().options = options;
    }

    pub fn options(&self) -> CompareOptions {
        self.session().options.clone()
    }

    // ========== 查询 ==========

    pub fn state(&self) -> WorkflowState {
        self.session().state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.session().state.phase()
    }

    pub fn can_compare(&self) -> bool {
        let session = self.session();
        session.state.can_compare(session.slots.is_complete())
    }

    pub fn can_export(&self) -> bool {
        self.session().state.can_export()
    }

    pub fn result(&self) -> Option<SharedResult> {
        self.session().state.result().cloned()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.result().map(|r| Summary::from_stats(r.stats()))
    }

    pub fn preview(&self) -> Option<Preview> {
        self.result().map(|r| render_preview(&r))
    }

    // ========== 操作 ==========

    /// 发起比对
    ///
    /// 槽位不完整或已有比对在途时直接返回 [`ProcessResult::Skipped`]
    pub async fn compare(&self) -> AppResult<ProcessResult> {
        let (original, modified, options) = {
            let mut session = self.session();
            let pair = session.slots.pair();
            let (Some(next), Some((original, modified))) =
                (session.state.begin_compare(pair.is_some()), pair)
            else {
                debug!("比对守卫不满足，跳过");
                return Ok(ProcessResult::Skipped);
            };
            session.state = next;
            (original, modified, session.options.clone())
        };

        info!(
            "🔍 正在比对 {} ↔ {} (模式: {})...",
            original.file_name, modified.file_name, options.mode
        );

        let outcome = match self.api.compare(&original, &modified, &options).await {
            Ok(raw) => normalize(raw).map_err(AppError::from),
            Err(e) => Err(AppError::from(e)),
        };

        match outcome {
            Ok(result) => {
                let variant = result.variant_name();
                let total = result.stats().total;
                {
                    let mut session = self.session();
                    session.state = session.state.complete_compare(result);
                    session.compared_original = Some(original);
                }
                info!("✓ 比对完成 ({} 结果, 共 {} 处变更)", variant, total);
                Ok(ProcessResult::Success)
            }
            Err(e) => {
                {
                    let mut session = self.session();
                    session.state = session.state.fail_compare();
                }
                warn!("⚠️ 比对失败: {}", e);
                self.notifier
                    .notify(&UserNotice::new(UserAction::Compare, e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn export_pdf(&self) -> AppResult<ExportOutcome> {
        self.export(ExportKind::Pdf).await
    }

    pub async fn export_docx(&self) -> AppResult<ExportOutcome> {
        self.export(ExportKind::Docx).await
    }

    /// 导出当前结果
    ///
    /// 没有结果或已有导出在途（无论 PDF 还是 DOCX）时直接返回 [`ExportOutcome::Skipped`]
    pub async fn export(&self, kind: ExportKind) -> AppResult<ExportOutcome> {
        let (result, original, options) = {
            let mut session = self.session();
            let Some((next, result)) = session.state.begin_export(kind) else {
                debug!("导出守卫不满足，跳过 {} 导出", kind);
                return Ok(ExportOutcome::Skipped);
            };
            session.state = next;
            (result, session.compared_original.clone(), session.options.clone())
        };

        let job = ExportJob { controller: self };
        let outcome = self
            .pipeline
            .run(&result, kind, original.as_deref(), &options)
            .await;
        drop(job);

        match outcome {
            Ok(path) => Ok(ExportOutcome::Downloaded(path)),
            Err(e) => {
                let message = match &e {
                    AppError::Export(ExportError::Failed { message, .. }) => message.clone(),
                    other => other.to_string(),
                };
                self.notifier
                    .notify(&UserNotice::new(UserAction::Export(kind), message));
                Err(e)
            }
        }
    }
}

/// 导出任务守卫，离开作用域时清除导出状态
struct ExportJob<'a> {
    controller: &'a WorkflowController,
}

impl Drop for ExportJob<'_> {
    fn drop(&mut self) {
        let mut session = self.controller.session();
        session.state = session.state.finish_export();
    }
}
