use crate::config::Config;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 评分服务启动");
    info!("📡 监听地址: {}", config.server_addr);
    if config.store_base_url.is_empty() {
        info!("📦 文档存储: 内存模式（仅用于本地开发）");
    } else {
        info!("📦 文档存储: {}", config.store_base_url);
    }
    info!("🤖 评分模型: {}", config.llm_model_name);
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
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
