//! 通知器（Notifier）协议
//!
//! 外部协作者：接收用户在某活动上的状态迁移，投递方式（推送、站内信等）不在此处定义。
//!
use crate::error::DomainResult as Result;
use crate::value_object::{EventId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// 抽签或补录中被抽中
    Selected,
    /// 显式抽签中落选
    NotSelected,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub event_id: EventId,
    pub user_id: UserId,
    pub kind: TransitionKind,
    pub occurred_at: DateTime<Utc>,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<()>;

    async fn notify_batch(&self, notifications: &[Notification]) -> Result<()> {
        for notification in notifications {
            self.notify(notification).await?;
        }
        Ok(())
    }
}
