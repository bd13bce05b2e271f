use super::change::RegistrationChange;
use super::event::Event;
use crate::domain_event::EventEnvelope;
use crate::eventing::{EventHandler, HandledEventType, Notification, Notifier, TransitionKind};
use crate::value_object::{EventId, UserId};
use async_trait::async_trait;
use std::sync::Arc;

/// 把已提交的报名事件翻译为通知并交给 `Notifier`
pub struct NotifyingHandler<N> {
    notifier: Arc<N>,
}

impl<N> NotifyingHandler<N>
where
    N: Notifier,
{
    pub fn new(notifier: Arc<N>) -> Self {
        Self { notifier }
    }
}

/// 一个事件可能对应多条通知（抽签会同时通知抽中者与落选者）
pub fn notifications(envelope: &EventEnvelope<Event>) -> Vec<Notification> {
    let event_id = EventId::from(envelope.metadata.aggregate_id());
    let occurred_at = *envelope.metadata.occurred_at();
    let notice = |user_id: &UserId, kind| Notification {
        event_id: event_id.clone(),
        user_id: user_id.clone(),
        kind,
        occurred_at,
    };

    match &envelope.payload.change {
        RegistrationChange::LotteryDrawn {
            selected,
            not_selected,
        } => selected
            .iter()
            .map(|u| notice(u, TransitionKind::Selected))
            .chain(
                not_selected
                    .iter()
                    .map(|u| notice(u, TransitionKind::NotSelected)),
            )
            .collect(),
        RegistrationChange::Backfilled { selected } => selected
            .iter()
            .map(|u| notice(u, TransitionKind::Selected))
            .collect(),
        RegistrationChange::Accepted { user_id } => {
            vec![notice(user_id, TransitionKind::Accepted)]
        }
        RegistrationChange::Declined { user_id } => {
            vec![notice(user_id, TransitionKind::Declined)]
        }
        _ => Vec::new(),
    }
}

#[async_trait]
impl<N> EventHandler<Event> for NotifyingHandler<N>
where
    N: Notifier + 'static,
{
    fn handler_name(&self) -> &str {
        "registration-notifier"
    }

    fn handled_event_type(&self) -> HandledEventType {
        HandledEventType::Many(vec![
            "RegistrationEvent.LotteryDrawn".to_string(),
            "RegistrationEvent.Backfilled".to_string(),
            "RegistrationEvent.Accepted".to_string(),
            "RegistrationEvent.Declined".to_string(),
        ])
    }

    async fn handle(&self, envelope: &EventEnvelope<Event>) -> anyhow::Result<()> {
        let notifications = notifications(envelope);
        if notifications.is_empty() {
            return Ok(());
        }
        self.notifier.notify_batch(&notifications).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::EventContext;
    use crate::registration::RegistrationEvent;
    use crate::value_object::Version;

    fn envelope(change: RegistrationChange) -> EventEnvelope<Event> {
        EventEnvelope::new(
            &EventId::from("evt-7"),
            RegistrationEvent::new(Version::from_value(3), change),
            EventContext::default(),
        )
    }

    #[test]
    fn lottery_notifies_winners_and_passed_over() {
        let env = envelope(RegistrationChange::LotteryDrawn {
            selected: vec!["a".into(), "b".into()],
            not_selected: vec!["c".into()],
        });

        let out = notifications(&env);
        let kinds: Vec<_> = out.iter().map(|n| (n.user_id.as_str(), n.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("a", TransitionKind::Selected),
                ("b", TransitionKind::Selected),
                ("c", TransitionKind::NotSelected),
            ]
        );
        assert!(out.iter().all(|n| n.event_id.as_str() == "evt-7"));
    }

    #[test]
    fn backfill_never_sends_not_selected() {
        let env = envelope(RegistrationChange::Backfilled {
            selected: vec!["d".into()],
        });
        let out = notifications(&env);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, TransitionKind::Selected);
    }

    #[test]
    fn membership_changes_are_silent() {
        let env = envelope(RegistrationChange::Joined {
            user_id: "e".into(),
        });
        let out = notifications(&env);
        assert!(out.is_empty());
    }
}
