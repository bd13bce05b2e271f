//! 文档存储协议与内存实现
//!
//! 条件写入语义：仅当存储中的版本等于 `expected` 时才覆盖
//! （`expected` 为初始版本表示文档必须尚不存在），否则返回 `VersionConflict`。
//!
use crate::{
    error::{DomainError, DomainResult as Result},
    persist::SerializedSnapshot,
    value_object::Version,
};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(
        &self,
        aggregate_type: &str,
        aggregate_id: &str,
    ) -> Result<Option<SerializedSnapshot>>;

    async fn compare_and_set(&self, expected: Version, document: SerializedSnapshot)
    -> Result<()>;
}

#[async_trait]
impl<T> DocumentStore for Arc<T>
where
    T: DocumentStore + ?Sized,
{
    async fn get(
        &self,
        aggregate_type: &str,
        aggregate_id: &str,
    ) -> Result<Option<SerializedSnapshot>> {
        (**self).get(aggregate_type, aggregate_id).await
    }

    async fn compare_and_set(
        &self,
        expected: Version,
        document: SerializedSnapshot,
    ) -> Result<()> {
        (**self).compare_and_set(expected, document).await
    }
}

/// 基于 dashmap 的内存文档存储，按 (类型, 标识) 分片加锁保证比较与写入的原子性
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<DashMap<(String, String), SerializedSnapshot>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(
        &self,
        aggregate_type: &str,
        aggregate_id: &str,
    ) -> Result<Option<SerializedSnapshot>> {
        let key = (aggregate_type.to_string(), aggregate_id.to_string());
        Ok(self.documents.get(&key).map(|doc| doc.value().clone()))
    }

    async fn compare_and_set(
        &self,
        expected: Version,
        document: SerializedSnapshot,
    ) -> Result<()> {
        let key = (
            document.aggregate_type().to_string(),
            document.aggregate_id().to_string(),
        );

        match self.documents.entry(key) {
            Entry::Occupied(mut occupied) => {
                let actual = occupied.get().aggregate_version();
                if actual != expected {
                    return Err(DomainError::VersionConflict { expected, actual });
                }
                occupied.insert(document);
            }
            Entry::Vacant(vacant) => {
                if !expected.is_new() {
                    return Err(DomainError::VersionConflict {
                        expected,
                        actual: Version::new(),
                    });
                }
                vacant.insert(document);
            }
        }
        Ok(())
    }
}
