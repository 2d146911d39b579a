//! 统计摘要

use std::fmt;

use crate::models::Stats;

/// 超过该变更总数时显示过载提示
pub const OVERLOAD_THRESHOLD: u64 = 30;

/// 摘要提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryIndicator {
    /// 没有任何变更
    Approved,
    /// 变更数量过多
    Overload,
}

impl fmt::Display for SummaryIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryIndicator::Approved => f.write_str("✅ approved: no changes detected"),
            SummaryIndicator::Overload => f.write_str("⚠️ overload: heavy redline"),
        }
    }
}

/// 比对摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub lines: Vec<String>,
    pub indicator: Option<SummaryIndicator>,
}

impl Summary {
    pub fn from_stats(stats: &Stats) -> Self {
        let lines = vec![
            format!("Insertions: {}", stats.insertions),
            format!("Deletions: {}", stats.deletions),
            format!("Moves: {}", stats.moves),
            format!("Total: {}", stats.total),
        ];

        let indicator = match stats.total {
            0 => Some(SummaryIndicator::Approved),
            t if t > OVERLOAD_THRESHOLD => Some(SummaryIndicator::Overload),
            _ => None,
        };

        Self { lines, indicator }
    }

    /// 单行形式，用于日志和预览页
    pub fn one_line(&self) -> String {
        self.lines.join(" · ")
    }
}
