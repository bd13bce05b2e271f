use crate::value_object::UserId;

use super::event::EventDetails;

/// 活动聚合支持的命令
#[derive(Debug, Clone)]
pub enum RegistrationCommand {
    Create {
        details: EventDetails,
        capacity: Option<usize>,
        waitlist_limit: Option<usize>,
    },
    Join {
        user_id: UserId,
    },
    Leave {
        user_id: UserId,
    },
    Draw {
        count: usize,
    },
    Accept {
        user_id: UserId,
    },
    Decline {
        user_id: UserId,
    },
    /// `replacements` 仅在容量无上限时作为补录目标
    Backfill {
        replacements: Option<usize>,
    },
    Admit {
        user_id: UserId,
    },
}
