//! 持久化（persist）
//!
//! 每个活动在文档存储中对应一条记录（`SerializedSnapshot`），写入以版本号做条件比较：
//! - `DocumentStore`：按类型与标识读取文档、按期望版本条件写入；
//! - `InMemoryDocumentStore`：基于 dashmap 的内存实现，按键原子比较并写入；
//! - `AggregateRepository` / `DocumentAggregateRepository`：聚合级别的加载与保存。
//!
//! 具体存储后端（如远端文档数据库）由上层提供实现并注入。
//!
mod aggregate_repository;
mod document_store;
mod serialized_snapshot;

pub use aggregate_repository::{AggregateRepository, DocumentAggregateRepository};
pub use document_store::{DocumentStore, InMemoryDocumentStore};
pub use serialized_snapshot::SerializedSnapshot;
