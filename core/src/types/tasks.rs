use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResourceType;
use crate::query::{ListOptions, QueryBuilder, ToQuery};
use crate::service::{Listable, Resource, Writable};

/// A to-do item, optionally attached to a lead, contact or deal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Computed by the server from `due_date`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remind: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remind_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListOptions {
    pub q: Option<String>,
    pub creator_id: Option<u64>,
    pub owner_id: Option<u64>,
    pub resource_type: Option<ResourceType>,
    pub resource_id: Option<u64>,
    pub completed: Option<bool>,
    pub overdue: Option<bool>,
    pub remind: Option<bool>,
    pub list: ListOptions,
}

impl ToQuery for TaskListOptions {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push_str("q", &self.q);
        query.push("creator_id", self.creator_id);
        query.push("owner_id", self.owner_id);
        query.push("resource_type", self.resource_type);
        query.push("resource_id", self.resource_id);
        query.push("completed", self.completed);
        query.push("overdue", self.overdue);
        query.push("remind", self.remind);
        query.append(&self.list);
    }
}

impl Resource for Task {
    const COLLECTION: &'static str = "v2/tasks";
}

impl Listable for Task {
    type Options = TaskListOptions;
}

impl Writable for Task {}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamps_and_resource_type_decode() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": 1,
                "resource_type": "lead",
                "resource_id": 1,
                "due_date": "2014-09-27T16:32:56Z",
                "completed": false,
                "content": "Contact Tom"
            }"#,
        )
        .unwrap();
        assert_eq!(task.resource_type, Some(ResourceType::Lead));
        assert_eq!(
            task.due_date,
            Some(Utc.with_ymd_and_hms(2014, 9, 27, 16, 32, 56).unwrap())
        );
        assert_eq!(task.completed, Some(false));
    }

    #[test]
    fn list_options_encode_resource_type() {
        let options = TaskListOptions {
            resource_type: Some(ResourceType::Deal),
            overdue: Some(true),
            ..TaskListOptions::default()
        };
        let mut query = QueryBuilder::new();
        query.append(&options);
        assert_eq!(query.encode().as_deref(), Some("resource_type=deal&overdue=true"));
    }
}
