//! 活动报名分配（registration）
//!
//! 活动聚合 `Event` 及其命令、领域事件、报名状态，以及把领域事件翻译为
//! 通知的事件处理器。
//!
mod change;
mod command;
mod event;
mod notify;
mod status;

pub use change::{RegistrationChange, RegistrationEvent};
pub use command::RegistrationCommand;
pub use event::{Event, EventDetails};
pub use notify::{NotifyingHandler, notifications};
pub use status::EntrantStatus;
