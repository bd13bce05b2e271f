use crate::dto::Dto;

/// 应用层查询（Query）
///
/// 表达只读意图，不改变活动状态，也不经过事务重试。
/// - 结果返回 [`Dto`](crate::dto::Dto)；
/// - 读取的是最近一次提交的活动记录，可能已被并发写者覆盖。
pub trait Query: Send + Sync + 'static {
    /// 查询的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    /// 查询返回的数据传输对象
    type Dto: Dto;
}
