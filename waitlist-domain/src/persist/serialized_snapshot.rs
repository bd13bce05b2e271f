use crate::{
    aggregate::Aggregate,
    error::{DomainError, DomainResult as Result},
    value_object::Version,
};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 文档存储中的一条聚合记录
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct SerializedSnapshot {
    aggregate_id: String,
    aggregate_type: String,
    aggregate_version: Version,
    stored_at: DateTime<Utc>,
    payload: Value,
}

impl SerializedSnapshot {
    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn aggregate_version(&self) -> Version {
        self.aggregate_version
    }

    pub fn stored_at(&self) -> DateTime<Utc> {
        self.stored_at
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// 将文档反序列化为聚合实例
    pub fn to_aggregate<A>(&self) -> Result<A>
    where
        A: Aggregate,
    {
        if A::TYPE != self.aggregate_type {
            return Err(DomainError::TypeMismatch {
                expected: A::TYPE.to_string(),
                found: self.aggregate_type.clone(),
            });
        }

        let aggregate: A = serde_json::from_value(self.payload.clone())?;
        if aggregate.version() != self.aggregate_version {
            return Err(DomainError::Repository {
                reason: format!(
                    "document {} claims {} but payload is {}",
                    self.aggregate_id,
                    self.aggregate_version,
                    aggregate.version()
                ),
            });
        }
        Ok(aggregate)
    }

    /// 从聚合实例创建文档
    pub fn from_aggregate<A>(aggregate: &A) -> Result<Self>
    where
        A: Aggregate,
    {
        Ok(Self {
            aggregate_id: aggregate.id().to_string(),
            aggregate_type: A::TYPE.to_string(),
            aggregate_version: aggregate.version(),
            stored_at: Utc::now(),
            payload: serde_json::to_value(aggregate)?,
        })
    }
}
