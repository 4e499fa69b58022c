//! Domain entities of the Base API and their list options.
//!
//! # Design
//! Every field is optional and skipped on serialization when unset, so the
//! same type describes a full server snapshot, a create payload and a
//! partial edit. Capability traits from `service` declare which operations
//! each entity supports.

mod accounts;
mod contacts;
mod deals;
mod leads;
mod loss_reasons;
mod notes;
mod sources;
mod tags;
mod tasks;
mod users;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use accounts::Account;
pub use contacts::{Contact, ContactListOptions};
pub use deals::{AssociatedContact, Deal, DealListOptions};
pub use leads::{Lead, LeadListOptions};
pub use loss_reasons::{LossReason, LossReasonListOptions};
pub use notes::{Note, NoteListOptions};
pub use sources::{Source, SourceListOptions};
pub use tags::{Tag, TagListOptions};
pub use tasks::{Task, TaskListOptions};
pub use users::{User, UserListOptions};

/// Open-ended custom field values, passed through as raw JSON.
pub type CustomFields = std::collections::BTreeMap<String, serde_json::Value>;

/// Postal address of a contact or lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Kind of resource a note, task or tag is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Lead,
    Contact,
    Deal,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Lead => "lead",
            ResourceType::Contact => "contact",
            ResourceType::Deal => "deal",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_wire_name_matches_display() {
        for kind in [ResourceType::Lead, ResourceType::Contact, ResourceType::Deal] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.to_string());
        }
    }

    #[test]
    fn address_skips_unset_fields() {
        let address = Address {
            city: Some("Hyannis".to_string()),
            country: Some("US".to_string()),
            ..Address::default()
        };
        assert_eq!(
            serde_json::to_value(&address).unwrap(),
            serde_json::json!({"city": "Hyannis", "country": "US"})
        );
    }
}
