//! 聚合根编排器（AggregateRoot）
//!
//! 封装“加载聚合 → 执行命令 → 应用事件 → 条件写入”的标准流程：
//! - 写入以加载时的版本号为条件，遇到 `VersionConflict` 时按 `RetryPolicy` 退避后整体重放；
//! - 重试耗尽返回 `Contention`，其余错误原样返回且不写入；
//! - 命令未产生事件时不写入、不提升版本；
//! - 提交成功后把事件信封异步派发给已注册的处理器，处理器失败只记录日志。
//!
use crate::{
    aggregate::Aggregate,
    domain_event::{EventContext, EventEnvelope},
    entity::Entity,
    error::{DomainError, DomainResult},
    eventing::EventHandler,
    persist::AggregateRepository,
    retry::RetryPolicy,
    value_object::Version,
};
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, PoisonError};

/// 面向应用层的聚合根编排器。
///
/// - `A`：聚合类型（实现 `Aggregate`）
/// - `R`：聚合仓储（实现 `AggregateRepository<A>`）
pub struct AggregateRoot<A, R>
where
    A: Aggregate,
    R: AggregateRepository<A>,
{
    repo: R,
    rng: Mutex<Box<dyn RngCore + Send>>,
    retry: RetryPolicy,
    handlers: Vec<Arc<dyn EventHandler<A>>>,
}

impl<A, R> AggregateRoot<A, R>
where
    A: Aggregate + 'static,
    R: AggregateRepository<A>,
{
    /// 创建编排器实例，随机源取自系统熵
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
            retry: RetryPolicy::default(),
            handlers: Vec::new(),
        }
    }

    /// 替换随机源（测试中注入固定种子以复现抽签结果）
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_handler(mut self, handler: Arc<dyn EventHandler<A>>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// 读取当前已提交的聚合
    pub async fn load(&self, aggregate_id: &A::Id) -> DomainResult<Option<A>> {
        self.repo.load(aggregate_id).await
    }

    /// 执行聚合命令，返回已提交事件的信封（可能为空）
    pub async fn execute(
        &self,
        aggregate_id: &A::Id,
        command: A::Command,
        context: EventContext,
    ) -> DomainResult<Vec<EventEnvelope<A>>> {
        let attempts = self.retry.attempts();

        for attempt in 1..=attempts {
            let mut aggregate = match self.repo.load(aggregate_id).await? {
                Some(aggregate) => aggregate,
                None => <A as Entity>::new(aggregate_id.clone(), Version::new()),
            };
            let expected = aggregate.version();

            let events = self.decide(&aggregate, command.clone())?;
            if events.is_empty() {
                return Ok(Vec::new());
            }
            for event in &events {
                aggregate.apply(event);
            }

            match self
                .repo
                .save(&aggregate, expected, events, context.clone())
                .await
            {
                Ok(envelopes) => {
                    self.dispatch(&envelopes);
                    return Ok(envelopes);
                }
                Err(DomainError::VersionConflict { expected, actual }) => {
                    if attempt == attempts {
                        tracing::warn!(
                            aggregate_type = A::TYPE,
                            aggregate_id = %aggregate_id,
                            attempts,
                            "giving up after repeated version conflicts"
                        );
                        break;
                    }
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        aggregate_type = A::TYPE,
                        aggregate_id = %aggregate_id,
                        %expected,
                        %actual,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "version conflict, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }

        Err(DomainError::Contention { attempts })
    }

    // 同步执行，锁不会跨越 await
    fn decide(&self, aggregate: &A, command: A::Command) -> DomainResult<Vec<A::Event>> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        aggregate.execute(command, &mut **rng)
    }

    fn dispatch(&self, envelopes: &[EventEnvelope<A>]) {
        if self.handlers.is_empty() || envelopes.is_empty() {
            return;
        }

        let handlers = self.handlers.clone();
        let envelopes = envelopes.to_vec();
        tokio::spawn(async move {
            for envelope in &envelopes {
                for handler in handlers.iter().filter(|h| h.accepts(envelope)) {
                    if let Err(err) = handler.handle(envelope).await {
                        tracing::warn!(
                            handler = handler.handler_name(),
                            aggregate_id = envelope.metadata.aggregate_id(),
                            version = %envelope.metadata.aggregate_version(),
                            error = %err,
                            "event handler failed"
                        );
                    }
                }
            }
        });
    }
}
