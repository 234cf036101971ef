//! 文档存储 - 基础设施层
//!
//! 持有外部文档存储这一资源，只暴露两个能力：按 ID 读文档、
//! 按字段合并写文档。评分流程只依赖 `DocumentStore` trait，
//! 远程实现见 `clients/store_client.rs`，测试与本地开发使用
//! `MemoryStore`。

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// 提交集合名
pub const COLLECTION_SUBMISSIONS: &str = "submissions";
/// 考试集合名
pub const COLLECTION_EXAMS: &str = "exams";

/// 文档存储能力
///
/// 职责：
/// - 按集合 + ID 读取单个 JSON 文档
/// - 将给定字段合并写入已有文档
/// - 不理解文档内容，不出现 Exam / Submission 类型
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 按 ID 读取文档，不存在时返回 `None`
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// 将 `fields` 的顶层键合并写入已有文档
    ///
    /// 文档不存在时返回错误（写回只发生在已有提交上）。
    async fn update_fields(&self, collection: &str, id: &str, fields: Value) -> Result<()>;
}

/// 内存文档存储
///
/// 用于测试和本地开发（`store_base_url` 留空时启用），
/// 行为与远程存储一致：按集合 + ID 存取，更新按顶层字段合并。
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<(String, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 放入一个完整文档（测试播种用）
    pub fn insert(&self, collection: &str, id: &str, doc: Value) {
        self.docs
            .write()
            .expect("memory store lock poisoned")
            .insert((collection.to_string(), id.to_string()), doc);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let docs = self.docs.read().expect("memory store lock poisoned");
        Ok(docs
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    async fn update_fields(&self, collection: &str, id: &str, fields: Value) -> Result<()> {
        let mut docs = self.docs.write().expect("memory store lock poisoned");
        let doc = docs
            .get_mut(&(collection.to_string(), id.to_string()))
            .ok_or_else(|| anyhow::anyhow!("文档不存在: {}/{}", collection, id))?;

        let Value::Object(updates) = fields else {
            anyhow::bail!("更新字段必须是 JSON 对象");
        };

        let Some(target) = doc.as_object_mut() else {
            anyhow::bail!("目标文档不是 JSON 对象: {}/{}", collection, id);
        };

        for (key, value) in updates {
            target.insert(key, value);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_document_returns_none() {
        let store = MemoryStore::new();
        let result = store.get_by_id(COLLECTION_SUBMISSIONS, "sub-1").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_merges_top_level_fields() {
        let store = MemoryStore::new();
        store.insert(
            COLLECTION_SUBMISSIONS,
            "sub-1",
            json!({ "id": "sub-1", "studentId": "s-1" }),
        );

        store
            .update_fields(
                COLLECTION_SUBMISSIONS,
                "sub-1",
                json!({ "analysis": { "overallScore": 20.0 } }),
            )
            .await
            .unwrap();

        let doc = store
            .get_by_id(COLLECTION_SUBMISSIONS, "sub-1")
            .await
            .unwrap()
            .unwrap();
        // 原有字段保留，新字段并入
        assert_eq!(doc["studentId"], "s-1");
        assert_eq!(doc["analysis"]["overallScore"], 20.0);
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryStore::new();
        let result = store
            .update_fields(COLLECTION_SUBMISSIONS, "ghost", json!({ "analysis": {} }))
            .await;
        assert!(result.is_err());
    }
}
