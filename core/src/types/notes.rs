use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResourceType;
use crate::query::{ListOptions, QueryBuilder, ToQuery};
use crate::service::{Listable, Resource, Writable};

/// Free-text note attached to a lead, contact or deal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListOptions {
    pub q: Option<String>,
    pub creator_id: Option<u64>,
    pub resource_type: Option<ResourceType>,
    pub resource_id: Option<u64>,
    pub list: ListOptions,
}

impl ToQuery for NoteListOptions {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push_str("q", &self.q);
        query.push("creator_id", self.creator_id);
        query.push("resource_type", self.resource_type);
        query.push("resource_id", self.resource_id);
        query.append(&self.list);
    }
}

impl Resource for Note {
    const COLLECTION: &'static str = "v2/notes";
}

impl Listable for Note {
    type Options = NoteListOptions;
}

impl Writable for Note {}
