//! 活动聚合（Event）
//!
//! 一个活动持有四个用户集合：
//! - `waiting`：候补名单，保持加入顺序且无重复，是“曾经排队者”的历史记录；
//! - `selected`：已抽中、等待答复的受邀者；
//! - `participants`：已确认的参与者，数量不超过容量；
//! - `cancelled`：拒绝邀请（或被移出）的用户。
//!
//! 每个操作都先由 `decide_*` 纯函数产生变更，再经 `apply` 落到状态上；
//! 原地方法（`join`/`draw`/...）与事务路径（`Aggregate::execute`）共享同一套判定。
//!
use super::change::{RegistrationChange, RegistrationEvent};
use super::command::RegistrationCommand;
use super::status::EntrantStatus;
use crate::aggregate::Aggregate;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::value_object::{EventId, UserId, ValueObject, Version};
use bon::Builder;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use rand::seq::index;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// 活动的描述性信息，引擎只保存不解释（抽签时间由外部调度决定）
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    #[builder(into)]
    pub title: String,
    pub description: Option<String>,
    pub organizer_id: Option<UserId>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub lottery_draw_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    version: Version,
    details: EventDetails,
    /// `None` 表示不限容量
    capacity: Option<usize>,
    /// 由调用方在加入时校验，聚合内部不强制
    waitlist_limit: Option<usize>,
    waiting: IndexSet<UserId>,
    selected: IndexSet<UserId>,
    participants: IndexSet<UserId>,
    cancelled: IndexSet<UserId>,
}

impl Entity for Event {
    type Id = EventId;

    fn new(aggregate_id: Self::Id, version: Version) -> Self {
        Self {
            id: aggregate_id,
            version,
            details: EventDetails::default(),
            capacity: None,
            waitlist_limit: None,
            waiting: IndexSet::new(),
            selected: IndexSet::new(),
            participants: IndexSet::new(),
            cancelled: IndexSet::new(),
        }
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }
}

impl Event {
    /// 创建一个已建立（版本 1）的空活动
    pub fn create(
        id: EventId,
        details: EventDetails,
        capacity: Option<usize>,
        waitlist_limit: Option<usize>,
    ) -> Self {
        let mut event = <Self as Entity>::new(id, Version::new());
        event.commit(RegistrationChange::Created {
            details,
            capacity,
            waitlist_limit,
        });
        event
    }

    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn waitlist_limit(&self) -> Option<usize> {
        self.waitlist_limit
    }

    pub fn waiting(&self) -> &IndexSet<UserId> {
        &self.waiting
    }

    pub fn selected(&self) -> &IndexSet<UserId> {
        &self.selected
    }

    pub fn participants(&self) -> &IndexSet<UserId> {
        &self.participants
    }

    pub fn cancelled(&self) -> &IndexSet<UserId> {
        &self.cancelled
    }

    /// 容量已设置且参与者已满
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.participants.len() >= capacity)
    }

    /// 尚未被参与者与待答复邀请占用的名额；不限容量时为 `None`
    pub fn open_slots(&self) -> Option<usize> {
        self.capacity.map(|capacity| {
            capacity.saturating_sub(self.participants.len() + self.selected.len())
        })
    }

    /// 可抽签池：`waiting − (selected ∪ participants ∪ cancelled)`，按加入顺序
    pub fn eligible(&self) -> impl Iterator<Item = &UserId> + '_ {
        self.waiting.iter().filter(|user_id| {
            !self.selected.contains(*user_id)
                && !self.participants.contains(*user_id)
                && !self.cancelled.contains(*user_id)
        })
    }

    pub fn status_of(&self, user_id: &UserId) -> EntrantStatus {
        if self.participants.contains(user_id) {
            EntrantStatus::Participant
        } else if self.cancelled.contains(user_id) {
            EntrantStatus::Cancelled
        } else if self.selected.contains(user_id) {
            EntrantStatus::Selected
        } else if self.waiting.contains(user_id) {
            EntrantStatus::Waiting
        } else {
            EntrantStatus::Unregistered
        }
    }

    /// 补录目标：有容量时为 `capacity − |participants|`，否则取调用方给定的数量
    pub fn backfill_target(&self, replacements: Option<usize>) -> usize {
        match self.capacity {
            Some(capacity) => capacity.saturating_sub(self.participants.len()),
            None => replacements.unwrap_or(0),
        }
    }

    /// 校验集合间的不变量，返回第一个被破坏的约束
    pub fn check_invariants(&self) -> DomainResult<()> {
        let pairs = [
            ("participants", &self.participants, "selected", &self.selected),
            ("participants", &self.participants, "cancelled", &self.cancelled),
            ("selected", &self.selected, "cancelled", &self.cancelled),
        ];
        for (left_name, left, right_name, right) in pairs {
            if let Some(user_id) = left.intersection(right).next() {
                return Err(DomainError::InvalidState {
                    reason: format!("{user_id} is in both {left_name} and {right_name}"),
                });
            }
        }

        if let Some(capacity) = self.capacity {
            if self.participants.len() > capacity {
                return Err(DomainError::InvalidState {
                    reason: format!(
                        "{} participants exceed capacity {capacity}",
                        self.participants.len()
                    ),
                });
            }
        }

        Ok(())
    }

    // --- 原地操作 ---

    /// 加入候补名单；已在名单中时为幂等空操作
    pub fn join(&mut self, user_id: UserId) -> bool {
        let change = self.decide_join(user_id);
        self.commit_if_changed(change)
    }

    /// 离开候补名单；不影响其余三个集合
    pub fn leave(&mut self, user_id: &UserId) -> bool {
        let change = self.decide_leave(user_id.clone());
        self.commit_if_changed(change)
    }

    /// 抽签：从可抽签池中无放回地均匀抽取至多 `count` 人，返回新抽中的用户
    pub fn draw<R>(&mut self, count: usize, rng: &mut R) -> Vec<UserId>
    where
        R: Rng + ?Sized,
    {
        let change = self.decide_draw(count, rng);
        self.commit_selection(change)
    }

    pub fn accept(&mut self, user_id: &UserId) -> DomainResult<()> {
        let change = self.decide_accept(user_id.clone())?;
        self.commit(change);
        Ok(())
    }

    pub fn decline(&mut self, user_id: &UserId) -> DomainResult<()> {
        let change = self.decide_decline(user_id.clone())?;
        self.commit(change);
        Ok(())
    }

    /// 补录：把待答复邀请补足到补录目标，从不缩减 `selected`
    pub fn backfill<R>(&mut self, replacements: Option<usize>, rng: &mut R) -> Vec<UserId>
    where
        R: Rng + ?Sized,
    {
        let change = self.decide_backfill(replacements, rng);
        self.commit_selection(change)
    }

    /// 直接录取（无抽签环节）；已满、已录取或已处于邀请流程中时为空操作
    pub fn admit(&mut self, user_id: UserId) -> bool {
        let change = self.decide_admit(user_id);
        self.commit_if_changed(change)
    }

    fn commit(&mut self, change: RegistrationChange) -> RegistrationEvent {
        let event = RegistrationEvent::new(self.version.next(), change);
        self.apply(&event);
        event
    }

    fn commit_if_changed(&mut self, change: Option<RegistrationChange>) -> bool {
        match change {
            Some(change) => {
                self.commit(change);
                true
            }
            None => false,
        }
    }

    fn commit_selection(&mut self, change: Option<RegistrationChange>) -> Vec<UserId> {
        let Some(change) = change else {
            return Vec::new();
        };
        let selected = match &change {
            RegistrationChange::LotteryDrawn { selected, .. }
            | RegistrationChange::Backfilled { selected } => selected.clone(),
            _ => Vec::new(),
        };
        self.commit(change);
        selected
    }

    // --- 判定（不修改状态） ---

    fn decide_join(&self, user_id: UserId) -> Option<RegistrationChange> {
        if self.waiting.contains(&user_id) {
            return None;
        }
        Some(RegistrationChange::Joined { user_id })
    }

    fn decide_leave(&self, user_id: UserId) -> Option<RegistrationChange> {
        if !self.waiting.contains(&user_id) {
            return None;
        }
        Some(RegistrationChange::Left { user_id })
    }

    fn decide_draw<R>(&self, count: usize, rng: &mut R) -> Option<RegistrationChange>
    where
        R: Rng + ?Sized,
    {
        if count == 0 {
            return None;
        }
        let (selected, not_selected) = self.sample_eligible(count, rng);
        if selected.is_empty() {
            return None;
        }
        Some(RegistrationChange::LotteryDrawn {
            selected,
            not_selected,
        })
    }

    fn decide_backfill<R>(
        &self,
        replacements: Option<usize>,
        rng: &mut R,
    ) -> Option<RegistrationChange>
    where
        R: Rng + ?Sized,
    {
        let target = self.backfill_target(replacements);
        if self.selected.len() >= target {
            return None;
        }
        let (selected, _) = self.sample_eligible(target - self.selected.len(), rng);
        if selected.is_empty() {
            return None;
        }
        Some(RegistrationChange::Backfilled { selected })
    }

    fn decide_accept(&self, user_id: UserId) -> DomainResult<RegistrationChange> {
        if !self.selected.contains(&user_id) {
            let status = self.status_of(&user_id);
            return Err(DomainError::invalid_transition(
                &user_id,
                format!("cannot accept while {status:?}"),
            ));
        }
        if let Some(capacity) = self.capacity {
            if self.participants.len() >= capacity {
                return Err(DomainError::CapacityExceeded { capacity });
            }
        }
        Ok(RegistrationChange::Accepted { user_id })
    }

    fn decide_decline(&self, user_id: UserId) -> DomainResult<RegistrationChange> {
        if !self.selected.contains(&user_id) {
            let status = self.status_of(&user_id);
            return Err(DomainError::invalid_transition(
                &user_id,
                format!("cannot decline while {status:?}"),
            ));
        }
        Ok(RegistrationChange::Declined { user_id })
    }

    fn decide_admit(&self, user_id: UserId) -> Option<RegistrationChange> {
        if self.is_full()
            || self.participants.contains(&user_id)
            || self.selected.contains(&user_id)
            || self.cancelled.contains(&user_id)
        {
            return None;
        }
        Some(RegistrationChange::Admitted { user_id })
    }

    /// 返回 (抽中, 落选)；池不大于 `count` 时整池抽中
    fn sample_eligible<R>(&self, count: usize, rng: &mut R) -> (Vec<UserId>, Vec<UserId>)
    where
        R: Rng + ?Sized,
    {
        let pool: Vec<&UserId> = self.eligible().collect();
        if pool.len() <= count {
            return (pool.into_iter().cloned().collect(), Vec::new());
        }

        let mut picked = vec![false; pool.len()];
        let mut selected = Vec::with_capacity(count);
        for i in index::sample(rng, pool.len(), count).iter() {
            picked[i] = true;
            selected.push(pool[i].clone());
        }
        let not_selected = pool
            .iter()
            .zip(&picked)
            .filter(|(_, picked)| !**picked)
            .map(|(user_id, _)| (*user_id).clone())
            .collect();

        tracing::debug!(
            event_id = %self.id,
            pool = pool.len(),
            count,
            "sampled eligible entrants"
        );
        (selected, not_selected)
    }
}

fn validated(user_id: UserId) -> DomainResult<UserId> {
    user_id.validate()?;
    Ok(user_id)
}

impl Aggregate for Event {
    const TYPE: &'static str = "event";

    type Command = RegistrationCommand;
    type Event = RegistrationEvent;

    fn execute(
        &self,
        command: Self::Command,
        rng: &mut dyn RngCore,
    ) -> DomainResult<Vec<Self::Event>> {
        let creating = matches!(command, RegistrationCommand::Create { .. });
        if creating && self.version.is_created() {
            return Err(DomainError::InvalidState {
                reason: format!("event {} already created", self.id),
            });
        }
        if !creating && !self.version.is_created() {
            return Err(DomainError::NotFound {
                reason: format!("event {}", self.id),
            });
        }

        let change = match command {
            RegistrationCommand::Create {
                details,
                capacity,
                waitlist_limit,
            } => Some(RegistrationChange::Created {
                details,
                capacity,
                waitlist_limit,
            }),
            RegistrationCommand::Join { user_id } => self.decide_join(validated(user_id)?),
            RegistrationCommand::Leave { user_id } => self.decide_leave(validated(user_id)?),
            RegistrationCommand::Draw { count } => self.decide_draw(count, rng),
            RegistrationCommand::Accept { user_id } => {
                Some(self.decide_accept(validated(user_id)?)?)
            }
            RegistrationCommand::Decline { user_id } => {
                Some(self.decide_decline(validated(user_id)?)?)
            }
            RegistrationCommand::Backfill { replacements } => {
                self.decide_backfill(replacements, rng)
            }
            RegistrationCommand::Admit { user_id } => self.decide_admit(validated(user_id)?),
        };

        Ok(change
            .map(|change| RegistrationEvent::new(self.version.next(), change))
            .into_iter()
            .collect())
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.change {
            RegistrationChange::Created {
                details,
                capacity,
                waitlist_limit,
            } => {
                self.details = details.clone();
                self.capacity = *capacity;
                self.waitlist_limit = *waitlist_limit;
            }
            RegistrationChange::Joined { user_id } => {
                self.waiting.insert(user_id.clone());
            }
            RegistrationChange::Left { user_id } => {
                self.waiting.shift_remove(user_id);
            }
            RegistrationChange::LotteryDrawn { selected, .. }
            | RegistrationChange::Backfilled { selected } => {
                self.selected.extend(selected.iter().cloned());
            }
            RegistrationChange::Accepted { user_id } => {
                self.selected.shift_remove(user_id);
                self.participants.insert(user_id.clone());
            }
            RegistrationChange::Declined { user_id } => {
                self.selected.shift_remove(user_id);
                self.waiting.shift_remove(user_id);
                self.cancelled.insert(user_id.clone());
            }
            RegistrationChange::Admitted { user_id } => {
                self.participants.insert(user_id.clone());
            }
        }
        self.version = event.aggregate_version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::DomainEvent;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn user(n: usize) -> UserId {
        UserId::from(format!("user{n}"))
    }

    fn event_with(capacity: Option<usize>, joined: usize) -> Event {
        let mut event = Event::create(
            EventId::from("evt-1"),
            EventDetails::builder().title("Swim lessons").build(),
            capacity,
            None,
        );
        for n in 0..joined {
            event.join(user(n));
        }
        event
    }

    #[test]
    fn create_sets_capacity_and_version() {
        let event = event_with(Some(5), 0);
        assert_eq!(event.version(), Version::from_value(1));
        assert_eq!(event.capacity(), Some(5));
        assert_eq!(event.details().title, "Swim lessons");
        assert!(!event.is_full());
    }

    #[test]
    fn join_is_idempotent_and_keeps_order() {
        let mut event = event_with(Some(5), 0);
        assert!(event.join(user(2)));
        assert!(event.join(user(1)));
        assert!(!event.join(user(2)));

        let order: Vec<_> = event.waiting().iter().cloned().collect();
        assert_eq!(order, vec![user(2), user(1)]);
        // 无变化的调用不提升版本
        assert_eq!(event.version(), Version::from_value(3));
    }

    #[test]
    fn leave_only_touches_waiting() {
        let mut event = event_with(Some(5), 3);
        let mut rng = StdRng::seed_from_u64(7);
        event.draw(3, &mut rng);

        assert!(event.leave(&user(0)));
        assert!(!event.waiting().contains(&user(0)));
        assert!(event.selected().contains(&user(0)));
        assert!(!event.leave(&user(0)));
    }

    #[test]
    fn draw_takes_distinct_members_of_the_pool() {
        let mut event = event_with(Some(5), 10);
        let mut rng = StdRng::seed_from_u64(42);

        let drawn = event.draw(5, &mut rng);
        let unique: IndexSet<_> = drawn.iter().cloned().collect();
        assert_eq!(drawn.len(), 5);
        assert_eq!(unique.len(), 5);
        assert!(drawn.iter().all(|u| event.waiting().contains(u)));
        assert_eq!(event.selected().len(), 5);
        // 抽中者仍保留在候补名单中
        assert_eq!(event.waiting().len(), 10);
    }

    #[test]
    fn draw_with_small_pool_takes_everyone() {
        let mut event = event_with(Some(5), 3);
        let mut rng = StdRng::seed_from_u64(1);

        let drawn = event.draw(5, &mut rng);
        assert_eq!(drawn.len(), 3);
        assert_eq!(event.eligible().count(), 0);
        assert!(event.draw(5, &mut rng).is_empty());
    }

    #[test]
    fn draw_is_reproducible_with_the_same_seed() {
        let mut a = event_with(Some(5), 20);
        let mut b = a.clone();

        let drawn_a = a.draw(4, &mut StdRng::seed_from_u64(99));
        let drawn_b = b.draw(4, &mut StdRng::seed_from_u64(99));
        assert_eq!(drawn_a, drawn_b);
    }

    #[test]
    fn draw_excludes_participants_and_cancelled() {
        let mut event = event_with(None, 4);
        let mut rng = StdRng::seed_from_u64(3);
        event.draw(2, &mut rng);
        let selected: Vec<_> = event.selected().iter().cloned().collect();
        event.accept(&selected[0]).unwrap();
        event.decline(&selected[1]).unwrap();

        let eligible: Vec<_> = event.eligible().cloned().collect();
        assert_eq!(eligible.len(), 2);
        assert!(!eligible.contains(&selected[0]));
        assert!(!eligible.contains(&selected[1]));
    }

    #[test]
    fn accept_moves_selected_to_participants() {
        let mut event = event_with(Some(2), 2);
        let mut rng = StdRng::seed_from_u64(5);
        let drawn = event.draw(1, &mut rng);

        event.accept(&drawn[0]).unwrap();
        assert!(event.participants().contains(&drawn[0]));
        assert!(!event.selected().contains(&drawn[0]));
        assert!(event.waiting().contains(&drawn[0]));
        assert_eq!(event.status_of(&drawn[0]), EntrantStatus::Participant);
    }

    #[test]
    fn accept_requires_selection() {
        let mut event = event_with(Some(2), 2);
        let version = event.version();

        let err = event.accept(&user(0)).unwrap_err();
        match err {
            DomainError::InvalidTransition { user_id, .. } => assert_eq!(user_id, user(0)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(event.version(), version);
    }

    #[test]
    fn accept_rejects_when_capacity_reached() {
        let mut event = event_with(Some(1), 3);
        let mut rng = StdRng::seed_from_u64(11);
        let drawn = event.draw(2, &mut rng);

        event.accept(&drawn[0]).unwrap();
        let before = event.clone();
        let err = event.accept(&drawn[1]).unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { capacity: 1 }));
        assert_eq!(event, before);
    }

    #[test]
    fn decline_moves_selected_to_cancelled_and_off_the_waitlist() {
        let mut event = event_with(Some(3), 3);
        let mut rng = StdRng::seed_from_u64(8);
        let drawn = event.draw(1, &mut rng);

        event.decline(&drawn[0]).unwrap();
        assert!(event.cancelled().contains(&drawn[0]));
        assert!(!event.selected().contains(&drawn[0]));
        assert!(!event.waiting().contains(&drawn[0]));

        let err = event.decline(&drawn[0]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn backfill_tops_up_to_open_capacity() {
        let mut event = event_with(Some(3), 6);
        let mut rng = StdRng::seed_from_u64(21);
        let drawn = event.draw(3, &mut rng);
        event.accept(&drawn[0]).unwrap();
        event.decline(&drawn[1]).unwrap();

        let refill = event.backfill(None, &mut rng);
        assert_eq!(refill.len(), 1);
        assert_eq!(event.selected().len(), 2);
        assert!(event.backfill(None, &mut rng).is_empty());
    }

    #[test]
    fn backfill_never_shrinks_selected() {
        let mut event = event_with(Some(2), 5);
        let mut rng = StdRng::seed_from_u64(2);
        event.draw(4, &mut rng);

        assert!(event.backfill(None, &mut rng).is_empty());
        assert_eq!(event.selected().len(), 4);
    }

    #[test]
    fn backfill_uses_replacements_only_when_unbounded() {
        let mut rng = StdRng::seed_from_u64(4);

        let mut unbounded = event_with(None, 5);
        assert!(unbounded.backfill(None, &mut rng).is_empty());
        assert_eq!(unbounded.backfill(Some(2), &mut rng).len(), 2);

        let mut bounded = event_with(Some(1), 5);
        assert_eq!(bounded.backfill(Some(4), &mut rng).len(), 1);
    }

    #[test]
    fn admit_respects_capacity_and_existing_membership() {
        let mut event = event_with(Some(2), 3);
        let mut rng = StdRng::seed_from_u64(6);
        let drawn = event.draw(1, &mut rng);

        assert!(!event.admit(drawn[0].clone()));
        assert!(event.admit(UserId::from("walk-in-1")));
        assert!(!event.admit(UserId::from("walk-in-1")));
        assert!(event.admit(UserId::from("walk-in-2")));
        assert!(event.is_full());
        assert!(!event.admit(UserId::from("walk-in-3")));
        assert_eq!(event.participants().len(), 2);
    }

    #[test]
    fn unbounded_event_is_never_full() {
        let mut event = event_with(None, 0);
        for n in 0..50 {
            event.admit(user(n));
        }
        assert!(!event.is_full());
        assert_eq!(event.open_slots(), None);
    }

    #[test]
    fn execute_rejects_commands_on_uncreated_event() {
        let event = <Event as Entity>::new(EventId::from("ghost"), Version::new());
        let mut rng = StdRng::seed_from_u64(0);

        let err = event
            .execute(RegistrationCommand::Join { user_id: user(1) }, &mut rng)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let events = event
            .execute(
                RegistrationCommand::Create {
                    details: EventDetails::default(),
                    capacity: Some(1),
                    waitlist_limit: None,
                },
                &mut rng,
            )
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "RegistrationEvent.Created");
        assert_eq!(events[0].aggregate_version(), Version::from_value(1));
    }

    #[test]
    fn execute_rejects_blank_user_and_duplicate_create() {
        let event = event_with(Some(1), 0);
        let mut rng = StdRng::seed_from_u64(0);

        let err = event
            .execute(
                RegistrationCommand::Join {
                    user_id: UserId::from(""),
                },
                &mut rng,
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue { .. }));

        let err = event
            .execute(
                RegistrationCommand::Create {
                    details: EventDetails::default(),
                    capacity: None,
                    waitlist_limit: None,
                },
                &mut rng,
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
    }

    #[test]
    fn execute_then_apply_matches_in_place_draw() {
        let event = event_with(Some(3), 8);
        let mut in_place = event.clone();

        let drawn = in_place.draw(3, &mut StdRng::seed_from_u64(17));
        let events = event
            .execute(
                RegistrationCommand::Draw { count: 3 },
                &mut StdRng::seed_from_u64(17),
            )
            .unwrap();

        match &events[0].change {
            RegistrationChange::LotteryDrawn {
                selected,
                not_selected,
            } => {
                assert_eq!(selected, &drawn);
                assert_eq!(not_selected.len(), 5);
            }
            other => panic!("unexpected {other:?}"),
        }

        let mut replayed = event.clone();
        replayed.apply(&events[0]);
        assert_eq!(replayed.selected(), in_place.selected());
        assert_eq!(replayed.version(), in_place.version());
    }

    #[test]
    fn no_op_commands_produce_no_events() {
        let event = event_with(Some(2), 1);
        let mut rng = StdRng::seed_from_u64(0);

        let events = event
            .execute(RegistrationCommand::Join { user_id: user(0) }, &mut rng)
            .unwrap();
        assert!(events.is_empty());

        let events = event
            .execute(RegistrationCommand::Draw { count: 0 }, &mut rng)
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn serde_roundtrip_preserves_waiting_order() {
        let mut event = event_with(Some(4), 0);
        for n in [3, 1, 2] {
            event.join(user(n));
        }

        let json = serde_json::to_value(&event).unwrap();
        let back: Event = serde_json::from_value(json).unwrap();
        let order: Vec<_> = back.waiting().iter().cloned().collect();
        assert_eq!(order, vec![user(3), user(1), user(2)]);
        assert_eq!(back, event);
    }
}
