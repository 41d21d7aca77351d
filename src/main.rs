use anyhow::{Context, Result};
use question_paper::utils::logging;
use question_paper::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config).await.context("应用初始化失败")?;
    app.run().await.context("运行失败")?;

    Ok(())
}
