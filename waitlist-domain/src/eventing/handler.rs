//! 事件处理器（EventHandler）
//!
//! 定义消费某类/多类/全部事件的处理逻辑与元信息（名称、订阅类型）。
//!
use crate::aggregate::Aggregate;
use crate::domain_event::{DomainEvent, EventEnvelope};
use async_trait::async_trait;

#[derive(Clone, Debug)]
pub enum HandledEventType {
    One(String),
    Many(Vec<String>),
    All,
}

impl HandledEventType {
    pub fn matches(&self, event_type: &str) -> bool {
        match self {
            HandledEventType::One(t) => t == event_type,
            HandledEventType::Many(ts) => ts.iter().any(|t| t == event_type),
            HandledEventType::All => true,
        }
    }
}

/// 事件处理器：处理某一聚合提交后的事件
#[async_trait]
pub trait EventHandler<A>: Send + Sync
where
    A: Aggregate,
{
    /// 处理器名称（用于日志与审计）
    fn handler_name(&self) -> &str;

    /// 返回该处理器支持的事件类型
    fn handled_event_type(&self) -> HandledEventType {
        HandledEventType::All
    }

    /// 处理事件
    async fn handle(&self, envelope: &EventEnvelope<A>) -> anyhow::Result<()>;

    fn accepts(&self, envelope: &EventEnvelope<A>) -> bool {
        self.handled_event_type()
            .matches(envelope.payload.event_type())
    }
}

#[cfg(test)]
mod tests {
    use super::HandledEventType;

    #[test]
    fn handled_event_type_matching() {
        assert!(HandledEventType::All.matches("RegistrationEvent.Joined"));
        assert!(HandledEventType::One("A".into()).matches("A"));
        assert!(!HandledEventType::One("A".into()).matches("B"));

        let many = HandledEventType::Many(vec!["A".into(), "B".into()]);
        assert!(many.matches("B"));
        assert!(!many.matches("C"));
    }
}
