//! 候补名单与抽签分配领域层（waitlist-domain）
//!
//! 面向名额受限活动的报名分配引擎：
//! - 报名者加入候补名单（`waiting`）；
//! - 按抽签从候补池中均匀随机抽取受邀者（`selected`）；
//! - 受邀者接受成为参与者（`participants`）或拒绝进入取消名单（`cancelled`）；
//! - 空出的名额通过补录（backfill）自动从剩余候补池中补齐。
//!
//! 模块划分：
//! - `value_object`：标识与版本号等值对象；
//! - `entity` / `aggregate`：实体与聚合抽象（命令 → 事件 → 应用）；
//! - `registration`：活动聚合（`Event`）及其命令、领域事件与通知转换；
//! - `persist`：文档存储与聚合仓储端口（基于版本号的条件写入）；
//! - `aggregate_root`：带乐观并发重试的事务编排器；
//! - `eventing`：事件处理器与通知器端口。
//!
//! 聚合本身是纯函数式的：不做 I/O，随机源由调用方显式注入。
//! 所有并发处理都隔离在 `AggregateRoot` 与存储适配器边界。
//!
pub mod aggregate;
pub mod aggregate_root;
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod eventing;
pub mod persist;
pub mod registration;
pub mod retry;
pub mod value_object;
