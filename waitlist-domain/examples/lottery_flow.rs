/// 抽签分配流程示例
/// 十人报名五个名额：抽签 -> 接受/拒绝 -> 补录，并通过内存通知器观察状态迁移
use anyhow::Result as AnyResult;
use futures_util::StreamExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use waitlist_domain::aggregate_root::AggregateRoot;
use waitlist_domain::domain_event::EventContext;
use waitlist_domain::entity::Entity;
use waitlist_domain::eventing::InMemoryNotifier;
use waitlist_domain::persist::{DocumentAggregateRepository, InMemoryDocumentStore};
use waitlist_domain::registration::{
    Event, EventDetails, NotifyingHandler, RegistrationChange, RegistrationCommand,
};
use waitlist_domain::value_object::{EventId, UserId};

#[tokio::main]
async fn main() -> AnyResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let notifier = Arc::new(InMemoryNotifier::new(128));
    let mut notifications = notifier.subscribe();
    tokio::spawn(async move {
        while let Some(Ok(n)) = notifications.next().await {
            println!("  notify {} -> {:?}", n.user_id, n.kind);
        }
    });

    let store = Arc::new(InMemoryDocumentStore::new());
    let root = AggregateRoot::<Event, _>::new(DocumentAggregateRepository::new(store))
        .with_rng(StdRng::seed_from_u64(2024))
        .with_handler(Arc::new(NotifyingHandler::new(Arc::clone(&notifier))));

    let id = EventId::from("swim-lessons");
    let organizer = EventContext::builder()
        .actor_type("organizer".to_string())
        .actor_id("org-1".to_string())
        .build();

    root.execute(
        &id,
        RegistrationCommand::Create {
            details: EventDetails::builder()
                .title("Swim lessons")
                .description("Beginner group, Saturday mornings".to_string())
                .build(),
            capacity: Some(5),
            waitlist_limit: None,
        },
        organizer.clone(),
    )
    .await?;

    for n in 0..10 {
        root.execute(
            &id,
            RegistrationCommand::Join {
                user_id: UserId::from(format!("user{n}")),
            },
            EventContext::default(),
        )
        .await?;
    }

    println!("== draw 5");
    let drawn = root
        .execute(&id, RegistrationCommand::Draw { count: 5 }, organizer.clone())
        .await?;
    let selected = match drawn.first().map(|e| &e.payload.change) {
        Some(RegistrationChange::LotteryDrawn { selected, .. }) => selected.clone(),
        _ => Vec::new(),
    };
    println!("selected: {selected:?}");

    if let [first, second, ..] = selected.as_slice() {
        println!("== {first} accepts, {second} declines");
        root.execute(
            &id,
            RegistrationCommand::Accept {
                user_id: first.clone(),
            },
            EventContext::default(),
        )
        .await?;
        root.execute(
            &id,
            RegistrationCommand::Decline {
                user_id: second.clone(),
            },
            EventContext::default(),
        )
        .await?;
    }

    println!("== backfill");
    root.execute(
        &id,
        RegistrationCommand::Backfill { replacements: None },
        organizer,
    )
    .await?;

    if let Some(event) = root.load(&id).await? {
        println!(
            "{} at {}: waiting={} selected={} participants={} cancelled={}",
            event.details().title,
            event.version(),
            event.waiting().len(),
            event.selected().len(),
            event.participants().len(),
            event.cancelled().len(),
        );
    }

    // 让通知任务有机会把剩余消息打印完
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    Ok(())
}

