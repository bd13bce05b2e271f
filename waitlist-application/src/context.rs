use waitlist_domain::domain_event::EventContext;

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令/查询）所需的横切信息，例如：
/// - 业务语境（`EventContext`）：关联追踪 `correlation_id`、因果链 `causation_id`、
///   执行者类型/ID 等，随提交的领域事件一起交给事件处理器；
/// - 幂等键（`idempotency_key`）：用于在基础设施层实现请求幂等（如 API 层重复提交保护）。
///
/// 典型用法：
/// ```rust
/// use waitlist_application::context::AppContext;
/// use waitlist_domain::domain_event::EventContext;
///
/// let ctx = AppContext {
///     biz: EventContext::builder()
///         .maybe_correlation_id(Some("cor-123".into()))
///         .maybe_actor_type(Some("entrant".into()))
///         .maybe_actor_id(Some("user0".into()))
///         .build(),
///     idempotency_key: Some("idem-xyz".into()),
/// };
/// assert_eq!(ctx.biz.actor_id(), Some("user0"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    /// 业务语境（链路追踪、审计主体、操作因果）
    pub biz: EventContext,
    /// 幂等键（可选）：为空则由上层或基础设施决定是否参与幂等
    pub idempotency_key: Option<String>,
}

impl AppContext {
    /// 以执行者身份构造上下文
    pub fn actor(actor_type: impl Into<String>, actor_id: impl Into<String>) -> Self {
        Self {
            biz: EventContext::builder()
                .actor_type(actor_type.into())
                .actor_id(actor_id.into())
                .build(),
            idempotency_key: None,
        }
    }
}
