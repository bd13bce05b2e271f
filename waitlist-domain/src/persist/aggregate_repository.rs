//! 聚合仓储
//!
//! 以文档存储为后端：每次保存把聚合的完整状态写为一条文档，
//! 写入以读取时的版本号为条件，失败时返回 `VersionConflict` 交由上层重试。
//!
use crate::{
    aggregate::Aggregate,
    domain_event::{EventContext, EventEnvelope},
    error::DomainResult as Result,
    persist::{DocumentStore, SerializedSnapshot},
    value_object::Version,
};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AggregateRepository<A>: Send + Sync
where
    A: Aggregate,
{
    async fn load(&self, aggregate_id: &A::Id) -> Result<Option<A>>;

    /// 保存已应用 `events` 的聚合；`expected` 为加载时的版本
    async fn save(
        &self,
        aggregate: &A,
        expected: Version,
        events: Vec<A::Event>,
        context: EventContext,
    ) -> Result<Vec<EventEnvelope<A>>>;
}

#[async_trait]
impl<A, T> AggregateRepository<A> for Arc<T>
where
    A: Aggregate,
    T: AggregateRepository<A> + ?Sized,
{
    async fn load(&self, aggregate_id: &A::Id) -> Result<Option<A>> {
        (**self).load(aggregate_id).await
    }

    async fn save(
        &self,
        aggregate: &A,
        expected: Version,
        events: Vec<A::Event>,
        context: EventContext,
    ) -> Result<Vec<EventEnvelope<A>>> {
        (**self).save(aggregate, expected, events, context).await
    }
}

/// 基于 `DocumentStore` 的通用聚合仓储实现
pub struct DocumentAggregateRepository<S> {
    store: Arc<S>,
}

impl<S> DocumentAggregateRepository<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S> Clone for DocumentAggregateRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[async_trait]
impl<A, S> AggregateRepository<A> for DocumentAggregateRepository<S>
where
    A: Aggregate,
    S: DocumentStore,
{
    async fn load(&self, aggregate_id: &A::Id) -> Result<Option<A>> {
        let document = self
            .store
            .get(A::TYPE, &aggregate_id.to_string())
            .await?;

        document.map(|doc| doc.to_aggregate::<A>()).transpose()
    }

    async fn save(
        &self,
        aggregate: &A,
        expected: Version,
        events: Vec<A::Event>,
        context: EventContext,
    ) -> Result<Vec<EventEnvelope<A>>> {
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let document = SerializedSnapshot::from_aggregate(aggregate)?;
        self.store.compare_and_set(expected, document).await?;

        tracing::debug!(
            aggregate_type = A::TYPE,
            aggregate_id = %aggregate.id(),
            from = %expected,
            to = %aggregate.version(),
            "aggregate saved"
        );

        let envelopes = events
            .into_iter()
            .map(|event| EventEnvelope::<A>::new(aggregate.id(), event, context.clone()))
            .collect();
        Ok(envelopes)
    }
}
