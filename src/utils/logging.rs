/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use std::sync::Once;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::services::summary::Summary;

static INIT_ONCE: Once = Once::new();

/// 初始化日志
///
/// `RUST_LOG` 优先；否则按 `verbose` 选择 debug / info
pub fn init(verbose: bool) {
    INIT_ONCE.call_once(|| {
        let default_filter = if verbose {
            "redline_client=debug"
        } else {
            "redline_client=info"
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
            )
            .with_target(false)
            .try_init();
    });
}

/// 记录程序启动信息
///
/// # 参数
/// - `api_base_url`: 比对服务地址
/// - `output_dir`: 输出目录
pub fn log_startup(api_base_url: &str, output_dir: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 文档比对客户端 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 比对服务: {}", api_base_url);
    info!("📁 输出目录: {}", output_dir);
    info!("{}", "=".repeat(60));
}

/// 打印比对摘要
pub fn log_summary(summary: &Summary) {
    info!("\n{}", "─".repeat(60));
    info!("📊 比对摘要");
    for line in &summary.lines {
        info!("  {}", line);
    }
    if let Some(indicator) = summary.indicator {
        info!("  {}", indicator);
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `exported`: 成功导出数量
/// - `failed`: 导出失败数量
/// - `output_dir`: 输出目录
pub fn print_final_stats(exported: usize, failed: usize, output_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 导出成功: {}", exported);
    info!("❌ 导出失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n产物已保存至: {}", output_dir);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
