//! 聚合（Aggregate）抽象
//!
//! 约束一个聚合的核心行为：
//! - `execute` 将命令转换为事件（不改变状态），随机源由调用方注入；
//! - `apply` 将事件投影到状态（改变状态），必须是确定性的；
//! - 通过 `Entity` 约束聚合具备标识与版本。
//!
use crate::domain_event::DomainEvent;
use crate::entity::Entity;
use crate::error::DomainResult;
use rand::RngCore;
use serde::{Serialize, de::DeserializeOwned};

/// 聚合根接口
pub trait Aggregate: Entity + Clone + Serialize + DeserializeOwned + Send + Sync {
    const TYPE: &'static str;

    /// 该聚合支持的命令类型（事务冲突重试时会被克隆重放）
    type Command: Clone + Send + Sync;
    /// 该聚合产生的领域事件类型
    type Event: DomainEvent;

    /// 执行命令，返回产生的事件列表；空列表表示无状态变化
    fn execute(
        &self,
        command: Self::Command,
        rng: &mut dyn RngCore,
    ) -> DomainResult<Vec<Self::Event>>;

    /// 应用事件，更新聚合状态
    fn apply(&mut self, event: &Self::Event);
}
