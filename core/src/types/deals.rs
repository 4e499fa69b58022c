use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CustomFields;
use crate::client::Response;
use crate::error::Error;
use crate::http::{HttpMethod, Transport};
use crate::query::{add_options, ListOptions, QueryBuilder, ToQuery};
use crate::service::{Listable, Resource, Service, Writable};

/// Contact attached to a deal under a role label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<u64>,
    /// Role label, e.g. `involved`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// ISO 4217 code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_reason_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_contacts: Option<Vec<AssociatedContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropbox_email: Option<String>,
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
pub struct DealListOptions {
    pub q: Option<String>,
    pub name: Option<String>,
    pub creator_id: Option<u64>,
    pub owner_id: Option<u64>,
    /// Deals associated with this contact.
    pub contact_id: Option<u64>,
    pub source_id: Option<u64>,
    pub loss_reason_id: Option<u64>,
    pub hot: Option<bool>,
    pub list: ListOptions,
}

impl ToQuery for DealListOptions {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push_str("q", &self.q);
        query.push_str("name", &self.name);
        query.push("creator_id", self.creator_id);
        query.push("owner_id", self.owner_id);
        query.push("contact_id", self.contact_id);
        query.push("source_id", self.source_id);
        query.push("loss_reason_id", self.loss_reason_id);
        query.push("hot", self.hot);
        query.append(&self.list);
    }
}

impl Resource for Deal {
    const COLLECTION: &'static str = "v2/deals";
}

impl Listable for Deal {
    type Options = DealListOptions;
}

impl Writable for Deal {}

struct RoleQuery<'a>(&'a Option<String>);

impl ToQuery for RoleQuery<'_> {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push_str("role", self.0);
    }
}

impl<T: Transport> Service<'_, Deal, T> {
    /// Attaches `contact` to the deal, or updates its role when already
    /// attached. `true` only when the API answers 204.
    pub fn upsert_contact(
        &self,
        deal_id: u64,
        contact: &AssociatedContact,
    ) -> Result<(bool, Response), Error> {
        let contact_id = contact.contact_id.ok_or(Error::MissingField("contact_id"))?;
        let path = add_options(
            &associated_contact_path(deal_id, contact_id),
            Some(&RoleQuery(&contact.role)),
        );
        self.expect_no_content(HttpMethod::Put, &path)
    }

    /// Detaches the contact from the deal. `true` only when the API answers
    /// 204.
    pub fn delete_contact(&self, deal_id: u64, contact_id: u64) -> Result<(bool, Response), Error> {
        self.expect_no_content(HttpMethod::Delete, &associated_contact_path(deal_id, contact_id))
    }
}

fn associated_contact_path(deal_id: u64, contact_id: u64) -> String {
    format!(
        "{}/{deal_id}/associated_contacts/{contact_id}",
        Deal::COLLECTION
    )
}
