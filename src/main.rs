use answer_sheet::utils::logging;
use answer_sheet::{App, Config};
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行会话
    let mut app = App::initialize(config).await?;
    app.run().await?;

    Ok(())
}
