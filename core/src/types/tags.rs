use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResourceType;
use crate::query::{ListOptions, QueryBuilder, ToQuery};
use crate::service::{Listable, Resource, Writable};

/// A tag; `resource_type` scopes it to leads, contacts or deals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagListOptions {
    pub name: Option<String>,
    pub creator_id: Option<u64>,
    pub resource_type: Option<ResourceType>,
    pub list: ListOptions,
}

impl ToQuery for TagListOptions {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push_str("name", &self.name);
        query.push("creator_id", self.creator_id);
        query.push("resource_type", self.resource_type);
        query.append(&self.list);
    }
}

impl Resource for Tag {
    const COLLECTION: &'static str = "v2/tags";
}

impl Listable for Tag {
    type Options = TagListOptions;
}

impl Writable for Tag {}
