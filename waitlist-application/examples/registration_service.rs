/// 报名服务示例
/// 通过命令/查询总线驱动一个活动：报名 -> 抽签 -> 接受/拒绝（自动补录）-> 查询
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use waitlist_application::command_bus::CommandBus;
use waitlist_application::context::AppContext;
use waitlist_application::error::AppError;
use waitlist_application::query_bus::QueryBus;
use waitlist_application::registration::{
    AcceptInvitation, CreateEvent, DeclineInvitation, DrawLottery, GetEntrantStatus, GetEvent,
    JoinWaitlist, RegistrationService,
};
use waitlist_application::{InMemoryCommandBus, InMemoryQueryBus};
use waitlist_domain::aggregate_root::AggregateRoot;
use waitlist_domain::persist::{DocumentAggregateRepository, InMemoryDocumentStore};
use waitlist_domain::registration::EventDetails;
use waitlist_domain::value_object::{EventId, UserId};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let store = Arc::new(InMemoryDocumentStore::new());
    let root = AggregateRoot::new(DocumentAggregateRepository::new(store))
        .with_rng(StdRng::seed_from_u64(7));
    let service = Arc::new(RegistrationService::new(Arc::new(root)));

    let commands = InMemoryCommandBus::new();
    let queries = InMemoryQueryBus::new();
    service.register(&commands, &queries)?;

    let organizer = AppContext::actor("organizer", "org-1");
    let event_id = EventId::from("cooking-class");

    commands
        .dispatch(
            &organizer,
            CreateEvent::builder()
                .event_id(event_id.clone())
                .details(
                    EventDetails::builder()
                        .title("Cooking class")
                        .organizer_id(UserId::from("org-1"))
                        .build(),
                )
                .capacity(3)
                .waitlist_limit(20)
                .build(),
        )
        .await?;

    for n in 0..8 {
        let user_id = UserId::from(format!("user{n}"));
        let ctx = AppContext::actor("entrant", user_id.to_string());
        commands
            .dispatch(
                &ctx,
                JoinWaitlist {
                    event_id: event_id.clone(),
                    user_id,
                },
            )
            .await?;
    }

    let drawn = commands
        .dispatch(
            &organizer,
            DrawLottery {
                event_id: event_id.clone(),
                count: 3,
            },
        )
        .await?;
    println!("drawn: {drawn:?}");

    if let [first, second, ..] = drawn.as_slice() {
        commands
            .dispatch(
                &AppContext::actor("entrant", first.to_string()),
                AcceptInvitation {
                    event_id: event_id.clone(),
                    user_id: first.clone(),
                },
            )
            .await?;
        let replacements = commands
            .dispatch(
                &AppContext::actor("entrant", second.to_string()),
                DeclineInvitation {
                    event_id: event_id.clone(),
                    user_id: second.clone(),
                    auto_backfill: true,
                },
            )
            .await?;
        println!("{second} declined, replacements: {replacements:?}");

        let status = queries
            .dispatch(
                &organizer,
                GetEntrantStatus {
                    event_id: event_id.clone(),
                    user_id: second.clone(),
                },
            )
            .await?;
        println!("{} is now {:?}", status.user_id, status.status);
    }

    let dto = queries
        .dispatch(
            &organizer,
            GetEvent {
                event_id: event_id.clone(),
            },
        )
        .await?;
    println!(
        "{} (v{}): selected={:?} participants={:?} cancelled={:?}",
        dto.details.title, dto.version, dto.selected, dto.participants, dto.cancelled
    );
    Ok(())
}
