use serde::Serialize;
use waitlist_domain::entity::Entity;
use waitlist_domain::registration::{EntrantStatus, Event, EventDetails};
use waitlist_domain::value_object::{EventId, UserId};

/// 数据传输对象（DTO）
///
/// - 作为应用层的输出载体，面向接口/外部系统序列化友好；
/// - 与领域模型解耦，避免将聚合直接暴露到接口层。
pub trait Dto: Serialize + Send + Sync + 'static {}

/// 活动快照：四个名单按加入（或抽中）顺序排列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationDto {
    pub event_id: EventId,
    pub version: usize,
    pub details: EventDetails,
    pub capacity: Option<usize>,
    pub waitlist_limit: Option<usize>,
    pub is_full: bool,
    pub open_slots: Option<usize>,
    pub waiting: Vec<UserId>,
    pub selected: Vec<UserId>,
    pub participants: Vec<UserId>,
    pub cancelled: Vec<UserId>,
}

impl Dto for RegistrationDto {}

impl From<&Event> for RegistrationDto {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event.id().clone(),
            version: event.version().value(),
            details: event.details().clone(),
            capacity: event.capacity(),
            waitlist_limit: event.waitlist_limit(),
            is_full: event.is_full(),
            open_slots: event.open_slots(),
            waiting: event.waiting().iter().cloned().collect(),
            selected: event.selected().iter().cloned().collect(),
            participants: event.participants().iter().cloned().collect(),
            cancelled: event.cancelled().iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrantStatusDto {
    pub event_id: EventId,
    pub user_id: UserId,
    pub status: EntrantStatus,
}

impl Dto for EntrantStatusDto {}
