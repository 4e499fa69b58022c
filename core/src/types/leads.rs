use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, CustomFields};
use crate::query::{AddressFilter, ListOptions, QueryBuilder, ToQuery};
use crate::service::{Listable, Resource, Writable};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<CustomFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadListOptions {
    pub q: Option<String>,
    pub letter: Option<String>,
    pub creator_id: Option<u64>,
    pub owner_id: Option<u64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization_name: Option<String>,
    pub status: Option<String>,
    pub address: AddressFilter,
    pub list: ListOptions,
}

impl ToQuery for LeadListOptions {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push_str("q", &self.q);
        query.push_str("letter", &self.letter);
        query.push("creator_id", self.creator_id);
        query.push("owner_id", self.owner_id);
        query.push_str("first_name", &self.first_name);
        query.push_str("last_name", &self.last_name);
        query.push_str("organization_name", &self.organization_name);
        query.push_str("status", &self.status);
        query.append(&self.address);
        query.append(&self.list);
    }
}

impl Resource for Lead {
    const COLLECTION: &'static str = "v2/leads";
}

impl Listable for Lead {
    type Options = LeadListOptions;
}

impl Writable for Lead {}
