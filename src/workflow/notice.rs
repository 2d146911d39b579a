//! 用户通知
//!
//! 失败一律通过 [`Notifier`] 告知用户，具体渠道（日志、弹窗、终端）由调用方决定

use std::fmt;
use tracing::error;

use crate::models::ExportKind;

/// 触发通知的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Compare,
    Export(ExportKind),
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAction::Compare => f.write_str("比对"),
            UserAction::Export(kind) => write!(f, "导出 {}", kind),
        }
    }
}

/// 面向用户的失败通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub action: UserAction,
    pub message: String,
}

impl UserNotice {
    pub fn new(action: UserAction, message: impl Into<String>) -> Self {
        Self {
            action,
            message: message.into(),
        }
    }
}

impl fmt::Display for UserNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}失败: {}", self.action, self.message)
    }
}

/// 通知渠道
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &UserNotice);
}

/// 写入日志的通知渠道
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &UserNotice) {
        error!("❌ {}", notice);
    }
}
