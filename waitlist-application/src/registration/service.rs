use super::commands::{
    AcceptInvitation, AdmitEntrant, BackfillInvitations, CreateEvent, DeclineInvitation,
    DrawLottery, JoinWaitlist, LeaveWaitlist,
};
use super::queries::{GetEntrantStatus, GetEvent};
use crate::{
    command_handler::CommandHandler,
    context::AppContext,
    dto::{EntrantStatusDto, RegistrationDto},
    error::AppError,
    inmemory_command_bus::InMemoryCommandBus,
    inmemory_query_bus::InMemoryQueryBus,
    query_handler::QueryHandler,
};
use async_trait::async_trait;
use std::sync::Arc;
use waitlist_domain::aggregate_root::AggregateRoot;
use waitlist_domain::domain_event::EventEnvelope;
use waitlist_domain::persist::AggregateRepository;
use waitlist_domain::registration::{Event, RegistrationChange, RegistrationCommand};
use waitlist_domain::value_object::{EventId, UserId, ValueObject};

/// 报名用例服务：所有写操作都经由 `AggregateRoot` 的事务路径
pub struct RegistrationService<R>
where
    R: AggregateRepository<Event>,
{
    root: Arc<AggregateRoot<Event, R>>,
}

impl<R> RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    pub fn new(root: Arc<AggregateRoot<Event, R>>) -> Self {
        Self { root }
    }

    /// 把本服务注册为全部报名命令与查询的处理器
    pub fn register(
        self: &Arc<Self>,
        commands: &InMemoryCommandBus,
        queries: &InMemoryQueryBus,
    ) -> Result<(), AppError> {
        commands.register::<CreateEvent, _>(self.clone())?;
        commands.register::<JoinWaitlist, _>(self.clone())?;
        commands.register::<LeaveWaitlist, _>(self.clone())?;
        commands.register::<DrawLottery, _>(self.clone())?;
        commands.register::<AcceptInvitation, _>(self.clone())?;
        commands.register::<DeclineInvitation, _>(self.clone())?;
        commands.register::<BackfillInvitations, _>(self.clone())?;
        commands.register::<AdmitEntrant, _>(self.clone())?;

        queries.register::<GetEvent, _>(self.clone())?;
        queries.register::<GetEntrantStatus, _>(self.clone())?;
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &AppContext,
        event_id: &EventId,
        command: RegistrationCommand,
    ) -> Result<Vec<EventEnvelope<Event>>, AppError> {
        Ok(self
            .root
            .execute(event_id, command, ctx.biz.clone())
            .await?)
    }

    async fn load(&self, event_id: &EventId) -> Result<Event, AppError> {
        self.root
            .load(event_id)
            .await?
            .ok_or_else(|| AppError::AggregateNotFound(event_id.to_string()))
    }

    async fn backfill(
        &self,
        ctx: &AppContext,
        event_id: &EventId,
        replacements: Option<usize>,
    ) -> Result<Vec<UserId>, AppError> {
        let envelopes = self
            .execute(ctx, event_id, RegistrationCommand::Backfill { replacements })
            .await?;
        let selected = newly_selected(&envelopes);
        tracing::info!(event_id = %event_id, backfilled = selected.len(), "backfill finished");
        Ok(selected)
    }
}

fn newly_selected(envelopes: &[EventEnvelope<Event>]) -> Vec<UserId> {
    envelopes
        .iter()
        .flat_map(|envelope| match &envelope.payload.change {
            RegistrationChange::LotteryDrawn { selected, .. }
            | RegistrationChange::Backfilled { selected } => selected.clone(),
            _ => Vec::new(),
        })
        .collect()
}

#[async_trait]
impl<R> CommandHandler<CreateEvent> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(&self, ctx: &AppContext, cmd: CreateEvent) -> Result<(), AppError> {
        cmd.event_id.validate()?;
        if cmd.capacity == Some(0) {
            return Err(AppError::Validation("capacity must be positive".to_string()));
        }
        self.execute(
            ctx,
            &cmd.event_id,
            RegistrationCommand::Create {
                details: cmd.details,
                capacity: cmd.capacity,
                waitlist_limit: cmd.waitlist_limit,
            },
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl<R> CommandHandler<JoinWaitlist> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(&self, ctx: &AppContext, cmd: JoinWaitlist) -> Result<bool, AppError> {
        // 上限在事务外按最近一次读取校验，并发加入时可能略微超出
        let event = self.load(&cmd.event_id).await?;
        if let Some(limit) = event.waitlist_limit() {
            if !event.waiting().contains(&cmd.user_id) && event.waiting().len() >= limit {
                return Err(AppError::WaitlistFull { limit });
            }
        }

        let envelopes = self
            .execute(
                ctx,
                &cmd.event_id,
                RegistrationCommand::Join {
                    user_id: cmd.user_id,
                },
            )
            .await?;
        Ok(!envelopes.is_empty())
    }
}

#[async_trait]
impl<R> CommandHandler<LeaveWaitlist> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(&self, ctx: &AppContext, cmd: LeaveWaitlist) -> Result<bool, AppError> {
        let envelopes = self
            .execute(
                ctx,
                &cmd.event_id,
                RegistrationCommand::Leave {
                    user_id: cmd.user_id,
                },
            )
            .await?;
        Ok(!envelopes.is_empty())
    }
}

#[async_trait]
impl<R> CommandHandler<DrawLottery> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(&self, ctx: &AppContext, cmd: DrawLottery) -> Result<Vec<UserId>, AppError> {
        let envelopes = self
            .execute(
                ctx,
                &cmd.event_id,
                RegistrationCommand::Draw { count: cmd.count },
            )
            .await?;
        let selected = newly_selected(&envelopes);
        tracing::info!(
            event_id = %cmd.event_id,
            requested = cmd.count,
            selected = selected.len(),
            "lottery drawn"
        );
        Ok(selected)
    }
}

#[async_trait]
impl<R> CommandHandler<AcceptInvitation> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(&self, ctx: &AppContext, cmd: AcceptInvitation) -> Result<(), AppError> {
        self.execute(
            ctx,
            &cmd.event_id,
            RegistrationCommand::Accept {
                user_id: cmd.user_id,
            },
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl<R> CommandHandler<DeclineInvitation> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(
        &self,
        ctx: &AppContext,
        cmd: DeclineInvitation,
    ) -> Result<Vec<UserId>, AppError> {
        self.execute(
            ctx,
            &cmd.event_id,
            RegistrationCommand::Decline {
                user_id: cmd.user_id.clone(),
            },
        )
        .await?;

        if !cmd.auto_backfill {
            return Ok(Vec::new());
        }

        // 拒绝已提交，补录失败不应让整个请求失败
        match self.backfill(ctx, &cmd.event_id, None).await {
            Ok(selected) => Ok(selected),
            Err(err) => {
                tracing::warn!(
                    event_id = %cmd.event_id,
                    user_id = %cmd.user_id,
                    error = %err,
                    "backfill after decline failed"
                );
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl<R> CommandHandler<BackfillInvitations> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(
        &self,
        ctx: &AppContext,
        cmd: BackfillInvitations,
    ) -> Result<Vec<UserId>, AppError> {
        self.backfill(ctx, &cmd.event_id, cmd.replacements).await
    }
}

#[async_trait]
impl<R> CommandHandler<AdmitEntrant> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(&self, ctx: &AppContext, cmd: AdmitEntrant) -> Result<bool, AppError> {
        let envelopes = self
            .execute(
                ctx,
                &cmd.event_id,
                RegistrationCommand::Admit {
                    user_id: cmd.user_id,
                },
            )
            .await?;
        Ok(!envelopes.is_empty())
    }
}

#[async_trait]
impl<R> QueryHandler<GetEvent> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(&self, _ctx: &AppContext, q: GetEvent) -> Result<RegistrationDto, AppError> {
        let event = self.load(&q.event_id).await?;
        Ok(RegistrationDto::from(&event))
    }
}

#[async_trait]
impl<R> QueryHandler<GetEntrantStatus> for RegistrationService<R>
where
    R: AggregateRepository<Event> + 'static,
{
    async fn handle(
        &self,
        _ctx: &AppContext,
        q: GetEntrantStatus,
    ) -> Result<EntrantStatusDto, AppError> {
        let event = self.load(&q.event_id).await?;
        Ok(EntrantStatusDto {
            status: event.status_of(&q.user_id),
            event_id: q.event_id,
            user_id: q.user_id,
        })
    }
}
