use serde::{Deserialize, Serialize};

/// 单个用户相对于某个活动所处的状态
///
/// `Unregistered → Waiting → Selected → {Participant, Cancelled}`，
/// `Participant` 与 `Cancelled` 为终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntrantStatus {
    Unregistered,
    Waiting,
    Selected,
    Participant,
    Cancelled,
}

impl EntrantStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EntrantStatus::Participant | EntrantStatus::Cancelled)
    }
}
