use crate::api::{self, AppState};
use crate::clients::StoreClient;
use crate::config::Config;
use crate::infrastructure::{DocumentStore, MemoryStore};
use crate::orchestrator::SubmissionGrader;
use crate::services::LlmService;
use crate::utils::logging::log_startup;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    router: axum::Router,
}

impl App {
    /// 初始化应用
    ///
    /// 组装文档存储、评分模型、评分器与 HTTP 路由。
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // 文档存储：未配置远程地址时回退到内存存储
        let store: Arc<dyn DocumentStore> = if config.store_base_url.is_empty() {
            warn!("⚠️ 未配置 STORE_BASE_URL，使用内存存储（数据不落盘，仅用于本地开发）");
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(StoreClient::new(&config))
        };

        let model = Arc::new(LlmService::new(&config));
        let grader = Arc::new(SubmissionGrader::new(store, model, &config));

        let router = api::router(AppState { grader });

        Ok(Self { config, router })
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.config.server_addr)
            .await
            .with_context(|| format!("无法监听地址: {}", self.config.server_addr))?;

        info!("✓ HTTP 服务已就绪: {}", listener.local_addr()?);

        axum::serve(listener, self.router)
            .await
            .context("HTTP 服务异常退出")?;

        Ok(())
    }
}
