//! 工作流状态
//!
//! 状态是不可变值，所有迁移都是纯函数：守卫不满足时返回 `None`，调用方据此跳过操作

use std::sync::Arc;

use crate::models::{DiffResult, ExportKind, SharedResult};

/// 比对请求状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareJobState {
    #[default]
    Idle,
    InFlight,
}

/// 导出任务状态，任意时刻至多一个导出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportJobState {
    #[default]
    None,
    ExportingPdf,
    ExportingDocx,
}

impl ExportJobState {
    pub fn for_kind(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Pdf => ExportJobState::ExportingPdf,
            ExportKind::Docx => ExportJobState::ExportingDocx,
        }
    }

    pub fn kind(&self) -> Option<ExportKind> {
        match self {
            ExportJobState::None => None,
            ExportJobState::ExportingPdf => Some(ExportKind::Pdf),
            ExportJobState::ExportingDocx => Some(ExportKind::Docx),
        }
    }
}

/// 对外展示的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Comparing,
    Ready,
    Exporting(ExportKind),
}

/// 工作流状态
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    compare: CompareJobState,
    result: Option<SharedResult>,
    export: ExportJobState,
}

impl WorkflowState {
    pub fn compare_job(&self) -> CompareJobState {
        self.compare
    }

    pub fn export_job(&self) -> ExportJobState {
        self.export
    }

    pub fn result(&self) -> Option<&SharedResult> {
        self.result.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.compare == CompareJobState::InFlight {
            return Phase::Comparing;
        }
        match (self.export.kind(), &self.result) {
            (Some(kind), _) => Phase::Exporting(kind),
            (None, Some(_)) => Phase::Ready,
            (None, None) => Phase::Idle,
        }
    }

    /// 两个槽位都已选择且没有比对在途
    pub fn can_compare(&self, slots_ready: bool) -> bool {
        slots_ready && self.compare == CompareJobState::Idle
    }

    /// 已有结果且没有导出在途
    pub fn can_export(&self) -> bool {
        self.result.is_some() && self.export == ExportJobState::None
    }

    pub fn begin_compare(&self, slots_ready: bool) -> Option<Self> {
        if !self.can_compare(slots_ready) {
            return None;
        }
        Some(Self {
            compare: CompareJobState::InFlight,
            ..self.clone()
        })
    }

    /// 比对成功：整体替换结果
    pub fn complete_compare(&self, result: DiffResult) -> Self {
        Self {
            compare: CompareJobState::Idle,
            result: Some(Arc::new(result)),
            export: self.export,
        }
    }

    /// 比对失败：回到之前的状态，旧结果保持不变
    pub fn fail_compare(&self) -> Self {
        Self {
            compare: CompareJobState::Idle,
            ..self.clone()
        }
    }

    /// 开始导出，返回新状态和本次导出使用的结果快照
    pub fn begin_export(&self, kind: ExportKind) -> Option<(Self, SharedResult)> {
        if !self.can_export() {
            return None;
        }
        let result = self.result.clone()?;
        let next = Self {
            export: ExportJobState::for_kind(kind),
            ..self.clone()
        };
        Some((next, result))
    }

    pub fn finish_export(&self) -> Self {
        Self {
            export: ExportJobState::None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LegacyResult, OoxmlResult, Stats};

    fn legacy() -> DiffResult {
        DiffResult::Legacy(LegacyResult {
            paragraphs: vec![],
            stats: Stats::default(),
            meta: Default::default(),
        })
    }

    fn ooxml() -> DiffResult {
        DiffResult::Ooxml(OoxmlResult {
            document_bytes: String::new(),
            stats: Stats::default(),
            meta: Default::default(),
        })
    }

    #[test]
    fn test_compare_requires_slots_and_no_inflight() {
        let idle = WorkflowState::default();
        assert_eq!(idle.phase(), Phase::Idle);
        assert!(!idle.can_compare(false));
        assert!(idle.begin_compare(false).is_none());

        let comparing = idle.begin_compare(true).unwrap();
        assert_eq!(comparing.phase(), Phase::Comparing);
        assert!(!comparing.can_compare(true));
        assert!(comparing.begin_compare(true).is_none());
    }

    #[test]
    fn test_complete_compare_replaces_result() {
        let ready = WorkflowState::default()
            .begin_compare(true)
            .unwrap()
            .complete_compare(legacy());
        assert_eq!(ready.phase(), Phase::Ready);
        assert!(matches!(**ready.result().unwrap(), DiffResult::Legacy(_)));

        let replaced = ready.begin_compare(true).unwrap().complete_compare(ooxml());
        assert!(matches!(**replaced.result().unwrap(), DiffResult::Ooxml(_)));
    }

    #[test]
    fn test_fail_compare_keeps_prior_result() {
        let ready = WorkflowState::default()
            .begin_compare(true)
            .unwrap()
            .complete_compare(legacy());
        let prior = ready.result().cloned().unwrap();

        let failed = ready.begin_compare(true).unwrap().fail_compare();
        assert_eq!(failed.phase(), Phase::Ready);
        assert!(Arc::ptr_eq(failed.result().unwrap(), &prior));

        let from_idle = WorkflowState::default()
            .begin_compare(true)
            .unwrap()
            .fail_compare();
        assert_eq!(from_idle.phase(), Phase::Idle);
    }

    #[test]
    fn test_export_guard_is_by_kind_flag() {
        assert!(WorkflowState::default().begin_export(ExportKind::Pdf).is_none());

        let ready = WorkflowState::default()
            .begin_compare(true)
            .unwrap()
            .complete_compare(ooxml());

        let (exporting, snapshot) = ready.begin_export(ExportKind::Pdf).unwrap();
        assert_eq!(exporting.export_job(), ExportJobState::ExportingPdf);
        assert_eq!(exporting.phase(), Phase::Exporting(ExportKind::Pdf));
        assert!(Arc::ptr_eq(&snapshot, ready.result().unwrap()));

        // PDF 在途时 PDF 和 DOCX 都被拒绝
        assert!(exporting.begin_export(ExportKind::Pdf).is_none());
        assert!(exporting.begin_export(ExportKind::Docx).is_none());

        let done = exporting.finish_export();
        assert_eq!(done.export_job(), ExportJobState::None);
        assert_eq!(done.phase(), Phase::Ready);
        assert!(done.can_export());
    }

    #[test]
    fn test_compare_during_export_keeps_export_job() {
        let (exporting, _) = WorkflowState::default()
            .begin_compare(true)
            .unwrap()
            .complete_compare(legacy())
            .begin_export(ExportKind::Docx)
            .unwrap();

        let recompared = exporting
            .begin_compare(true)
            .unwrap()
            .complete_compare(ooxml());
        assert_eq!(recompared.export_job(), ExportJobState::ExportingDocx);
        assert!(matches!(**recompared.result().unwrap(), DiffResult::Ooxml(_)));
    }
}
