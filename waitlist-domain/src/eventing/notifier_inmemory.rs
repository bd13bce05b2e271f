//! 内存版通知器（InMemoryNotifier）
//!
//! 基于 `tokio::sync::broadcast` 实现的轻量通知器，满足 `Notifier` 协议：
//! - `notify`：克隆并广播通知；
//! - `subscribe`：返回 `'static` 生命周期通知流，便于在 `tokio::spawn` 中使用；
//! - 典型用途：测试环境、示例与本地开发。
//!
//! 注意：若无订阅者，发送的通知将被丢弃。

use crate::error::{DomainError, DomainResult as Result};
use crate::eventing::{Notification, Notifier};
use async_trait::async_trait;
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

#[derive(Clone)]
pub struct InMemoryNotifier {
    tx: broadcast::Sender<Notification>,
}

impl InMemoryNotifier {
    /// 创建一个内存通知器，`capacity` 为广播缓冲区容量（至少为 1）
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> BoxStream<'static, Result<Notification>> {
        let rx = self.tx.subscribe();
        let stream =
            BroadcastStream::new(rx).map(|r| r.map_err(|e| DomainError::notifier(e.to_string())));
        Box::pin(stream)
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        // 无订阅者时 send 返回错误，这里视为非致命并忽略
        let _ = self.tx.send(notification.clone());
        Ok(())
    }
}
