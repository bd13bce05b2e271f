//! 事件子系统（eventing）
//!
//! 事务提交之后的旁路处理：
//! - `EventHandler`：消费已提交的事件信封（按事件类型订阅）；
//! - `Notifier`：接收 (活动, 用户, 状态迁移) 通知的外部协作者端口；
//! - `InMemoryNotifier`：基于 tokio broadcast 的内存通知器，用于测试与本地开发。
//!
//! 通知是尽力而为的：处理失败只记录日志，从不回滚已提交的状态。
//!
pub mod handler;
pub mod notifier;
#[cfg(feature = "eventing")]
pub mod notifier_inmemory;

pub use handler::{EventHandler, HandledEventType};
pub use notifier::{Notification, Notifier, TransitionKind};
#[cfg(feature = "eventing")]
pub use notifier_inmemory::InMemoryNotifier;
