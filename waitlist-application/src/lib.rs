//! 候补名单应用层（waitlist-application）
//!
//! 面向服务层的用例编排：类型化的命令与查询、进程内命令/查询总线、
//! 应用上下文、DTO 与应用错误，以及把报名用例接到事务化活动聚合上的
//! `RegistrationService`。
//!
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod context;
pub mod dto;
pub mod error;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod query;
pub mod query_bus;
pub mod query_handler;
pub mod registration;

pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
