use anyhow::Result;
use grade_submission::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    grade_submission::logger::init();

    // 加载配置
    let config = Config::load()?;

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
