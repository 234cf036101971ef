/// 文档存储 API 客户端
///
/// 封装所有与远程文档存储相关的调用逻辑
use crate::config::Config;
use crate::infrastructure::DocumentStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

/// 文档存储客户端
///
/// 约定的 REST 形态：
/// - `GET  {base}/{collection}/{id}`   读取文档，404 表示不存在
/// - `PATCH {base}/{collection}/{id}`  按顶层字段合并更新
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl StoreClient {
    /// 创建新的文档存储客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.store_base_url.trim_end_matches('/').to_string(),
            token: config.store_token.clone(),
        }
    }

    fn doc_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        }
    }
}

#[async_trait]
impl DocumentStore for StoreClient {
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let url = self.doc_url(collection, id);
        debug!("读取文档: {}", url);

        let response = self
            .with_auth(self.http.get(&url))
            .send()
            .await
            .with_context(|| format!("文档存储请求失败: {}", url))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .with_context(|| format!("文档存储返回错误状态: {}", url))?;

        let doc: Value = response
            .json()
            .await
            .with_context(|| format!("文档响应解析失败: {}", url))?;

        Ok(Some(doc))
    }

    async fn update_fields(&self, collection: &str, id: &str, fields: Value) -> Result<()> {
        let url = self.doc_url(collection, id);
        debug!("更新文档: {}", url);

        self.with_auth(self.http.patch(&url))
            .json(&fields)
            .send()
            .await
            .with_context(|| format!("文档存储请求失败: {}", url))?
            .error_for_status()
            .with_context(|| format!("文档更新被拒绝: {}", url))?;

        Ok(())
    }
}
