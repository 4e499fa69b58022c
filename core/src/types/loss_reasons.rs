use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::{ListOptions, QueryBuilder, ToQuery};
use crate::service::{Listable, Resource, Writable};

/// Reason a deal was lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossReason {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LossReasonListOptions {
    pub creator_id: Option<u64>,
    pub name: Option<String>,
    pub list: ListOptions,
}

impl ToQuery for LossReasonListOptions {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push("creator_id", self.creator_id);
        query.push_str("name", &self.name);
        query.append(&self.list);
    }
}

impl Resource for LossReason {
    const COLLECTION: &'static str = "v2/loss_reasons";
}

impl Listable for LossReason {
    type Options = LossReasonListOptions;
}

impl Writable for LossReason {}
