use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务监听地址
    pub server_addr: String,
    /// 文档存储服务地址（留空则使用内存存储，仅用于本地开发）
    pub store_base_url: String,
    /// 文档存储访问令牌
    pub store_token: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:8080".to_string(),
            store_base_url: String::new(),
            store_token: String::new(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai"
                .to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            server_addr: std::env::var("SERVER_ADDR").unwrap_or(default.server_addr),
            store_base_url: std::env::var("STORE_BASE_URL").unwrap_or(default.store_base_url),
            store_token: std::env::var("STORE_TOKEN").unwrap_or(default.store_token),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }

    /// 从 TOML 文件加载配置
    ///
    /// 文件中未出现的字段使用默认值。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("配置文件解析失败: {}", path.display()))?;
        Ok(config)
    }

    /// 加载配置：优先 config.toml，否则回退到环境变量
    pub fn load() -> Result<Self> {
        let path = Path::new("config.toml");
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::from_env())
        }
    }
}
