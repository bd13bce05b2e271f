use crate::domain_event::DomainEvent;
use crate::value_object::{UserId, Version};
use serde::{Deserialize, Serialize};

use super::event::EventDetails;

/// 活动聚合的领域事件
///
/// 抽签结果在事件中显式记录被抽中的用户，使 `apply` 不依赖随机源。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationEvent {
    pub id: String,
    pub aggregate_version: Version,
    pub change: RegistrationChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistrationChange {
    Created {
        details: EventDetails,
        capacity: Option<usize>,
        waitlist_limit: Option<usize>,
    },
    Joined {
        user_id: UserId,
    },
    Left {
        user_id: UserId,
    },
    /// 显式抽签：`not_selected` 为本轮落选的候补池成员
    LotteryDrawn {
        selected: Vec<UserId>,
        not_selected: Vec<UserId>,
    },
    Backfilled {
        selected: Vec<UserId>,
    },
    Accepted {
        user_id: UserId,
    },
    Declined {
        user_id: UserId,
    },
    Admitted {
        user_id: UserId,
    },
}

impl RegistrationEvent {
    pub fn new(aggregate_version: Version, change: RegistrationChange) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            aggregate_version,
            change,
        }
    }
}

impl DomainEvent for RegistrationEvent {
    fn event_id(&self) -> &str {
        &self.id
    }

    fn event_type(&self) -> &str {
        match self.change {
            RegistrationChange::Created { .. } => "RegistrationEvent.Created",
            RegistrationChange::Joined { .. } => "RegistrationEvent.Joined",
            RegistrationChange::Left { .. } => "RegistrationEvent.Left",
            RegistrationChange::LotteryDrawn { .. } => "RegistrationEvent.LotteryDrawn",
            RegistrationChange::Backfilled { .. } => "RegistrationEvent.Backfilled",
            RegistrationChange::Accepted { .. } => "RegistrationEvent.Accepted",
            RegistrationChange::Declined { .. } => "RegistrationEvent.Declined",
            RegistrationChange::Admitted { .. } => "RegistrationEvent.Admitted",
        }
    }

    fn aggregate_version(&self) -> Version {
        self.aggregate_version
    }
}
