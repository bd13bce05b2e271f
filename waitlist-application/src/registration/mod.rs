//! 活动报名用例
//!
//! 把报名相关的命令与查询接到事务化的活动聚合上，
//! 并补上聚合本身不负责的调用方规则（候补名单上限、拒绝后自动补录）。
//!
mod commands;
mod queries;
mod service;

pub use commands::{
    AcceptInvitation, AdmitEntrant, BackfillInvitations, CreateEvent, DeclineInvitation,
    DrawLottery, JoinWaitlist, LeaveWaitlist,
};
pub use queries::{GetEntrantStatus, GetEvent};
pub use service::RegistrationService;
