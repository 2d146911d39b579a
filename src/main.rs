use anyhow::Result;
use clap::Parser;
use redline_client::utils::logging;
use redline_client::{App, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging || cli.verbose);

    // 初始化并运行应用
    let stats = App::initialize(config, cli).run().await?;

    if stats.failed > 0 {
        anyhow::bail!("{} 个导出失败", stats.failed);
    }

    Ok(())
}
