use crate::command::Command;
use bon::Builder;
use waitlist_domain::registration::EventDetails;
use waitlist_domain::value_object::{EventId, UserId};

#[derive(Builder, Debug, Clone)]
pub struct CreateEvent {
    #[builder(into)]
    pub event_id: EventId,
    pub details: EventDetails,
    pub capacity: Option<usize>,
    pub waitlist_limit: Option<usize>,
}

impl Command for CreateEvent {
    const NAME: &'static str = "CreateEvent";
    type Output = ();
}

/// 输出：是否为新加入（已在名单中时为 `false`）
#[derive(Debug, Clone)]
pub struct JoinWaitlist {
    pub event_id: EventId,
    pub user_id: UserId,
}

impl Command for JoinWaitlist {
    const NAME: &'static str = "JoinWaitlist";
    type Output = bool;
}

#[derive(Debug, Clone)]
pub struct LeaveWaitlist {
    pub event_id: EventId,
    pub user_id: UserId,
}

impl Command for LeaveWaitlist {
    const NAME: &'static str = "LeaveWaitlist";
    type Output = bool;
}

/// 输出：本轮抽中的用户
#[derive(Debug, Clone)]
pub struct DrawLottery {
    pub event_id: EventId,
    pub count: usize,
}

impl Command for DrawLottery {
    const NAME: &'static str = "DrawLottery";
    type Output = Vec<UserId>;
}

#[derive(Debug, Clone)]
pub struct AcceptInvitation {
    pub event_id: EventId,
    pub user_id: UserId,
}

impl Command for AcceptInvitation {
    const NAME: &'static str = "AcceptInvitation";
    type Output = ();
}

/// 输出：自动补录抽中的替补（未开启补录时为空）
#[derive(Debug, Clone)]
pub struct DeclineInvitation {
    pub event_id: EventId,
    pub user_id: UserId,
    pub auto_backfill: bool,
}

impl Command for DeclineInvitation {
    const NAME: &'static str = "DeclineInvitation";
    type Output = Vec<UserId>;
}

/// `replacements` 仅对不限容量的活动生效
#[derive(Debug, Clone)]
pub struct BackfillInvitations {
    pub event_id: EventId,
    pub replacements: Option<usize>,
}

impl Command for BackfillInvitations {
    const NAME: &'static str = "BackfillInvitations";
    type Output = Vec<UserId>;
}

/// 输出：是否录取成功（已满或已在流程中时为 `false`）
#[derive(Debug, Clone)]
pub struct AdmitEntrant {
    pub event_id: EventId,
    pub user_id: UserId,
}

impl Command for AdmitEntrant {
    const NAME: &'static str = "AdmitEntrant";
    type Output = bool;
}
