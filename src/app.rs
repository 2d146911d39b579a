//! 应用入口 - 编排层
//!
//! 持有 HTTP 客户端、下载目标和工作流控制器，按命令行参数执行一次完整流程：
//! 健康检查 → 选择文件 → 比对 → 摘要/预览 → 导出

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::clients::CompareClient;
use crate::config::Config;
use crate::models::{load_compare_options, CompareOptions, UploadedFile};
use crate::services::download::FileDownloadSink;
use crate::services::preview::Preview;
use crate::utils::logging::{log_startup, log_summary, print_final_stats, truncate_text};
use crate::workflow::{ExportOutcome, ProcessResult, TracingNotifier, WorkflowController};

/// 运行统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub exported: usize,
    pub failed: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    cli: Cli,
    client: Arc<CompareClient>,
    controller: WorkflowController,
}

impl App {
    /// 初始化应用，命令行参数覆盖环境配置
    pub fn initialize(mut config: Config, cli: Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            config.api_base_url = base_url.clone();
        }
        if let Some(output_dir) = &cli.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(options) = &cli.options {
            config.options_file = Some(options.display().to_string());
        }
        config.verbose_logging |= cli.verbose;

        log_startup(&config.api_base_url, &config.output_dir);

        let client = Arc::new(CompareClient::new(&config));
        let sink = Arc::new(FileDownloadSink::new(&config.output_dir));
        let controller = WorkflowController::new(client.clone(), sink, Arc::new(TracingNotifier));

        Self {
            config,
            cli,
            client,
            controller,
        }
    }

    pub fn controller(&self) -> &WorkflowController {
        &self.controller
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunStats> {
        if self.cli.check_health {
            let healthy = self
                .client
                .health()
                .await
                .context("无法连接到比对服务")?;
            if !healthy {
                anyhow::bail!("比对服务健康检查未通过: {}", self.client.base_url());
            }
            info!("✓ 比对服务健康检查通过");
        }

        let options = self.load_options().await?;
        self.controller.set_options(self.cli.apply_to(options));

        self.controller.select_original(load_file(&self.cli.original).await?);
        self.controller.select_modified(load_file(&self.cli.modified).await?);

        match self.controller.compare().await? {
            ProcessResult::Success => {}
            ProcessResult::Skipped => {
                warn!("⚠️ 比对未执行");
                return Ok(RunStats::default());
            }
        }

        if let Some(summary) = self.controller.summary() {
            log_summary(&summary);
        }

        match self.controller.preview() {
            Some(Preview::Html(html)) => {
                let path = self.write_preview(&html).await?;
                info!("🖼️ 预览已写入: {}", path.display());
            }
            Some(Preview::Document { encoded_len }) => {
                info!("🖼️ 修订跟踪文档已就绪 (base64 {} 字节)，导出后查看", encoded_len);
            }
            None => {}
        }

        let mut stats = RunStats::default();
        for kind in self.cli.export_kinds() {
            match self.controller.export(kind).await {
                Ok(ExportOutcome::Downloaded(_)) => stats.exported += 1,
                Ok(ExportOutcome::Skipped) => warn!("⚠️ {} 导出被跳过", kind),
                Err(e) => {
                    warn!("{} 导出失败: {}", kind, truncate_text(&e.to_string(), 200));
                    stats.failed += 1;
                }
            }
        }

        print_final_stats(stats.exported, stats.failed, &self.config.output_dir);

        Ok(stats)
    }

    async fn load_options(&self) -> Result<CompareOptions> {
        match &self.config.options_file {
            Some(path) => Ok(load_compare_options(Path::new(path)).await?),
            None => Ok(CompareOptions::default()),
        }
    }

    async fn write_preview(&self, html: &str) -> Result<PathBuf> {
        let dir = Path::new(&self.config.output_dir);
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("无法创建输出目录: {}", dir.display()))?;
        let path = dir.join("preview.html");
        tokio::fs::write(&path, html)
            .await
            .with_context(|| format!("无法写入预览: {}", path.display()))?;
        Ok(path)
    }
}

async fn load_file(path: &Path) -> Result<UploadedFile> {
    UploadedFile::load(path)
        .await
        .with_context(|| format!("无法加载文件: {}", path.display()))
}
