use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, CustomFields};
use crate::query::{AddressFilter, ListOptions, QueryBuilder, ToQuery};
use crate::service::{Listable, Resource, Writable};

/// A person or an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    /// Whether the contact is an organization rather than a person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_organization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Organization name; only for organizations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prospect_status: Option<String>,
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
pub struct ContactListOptions {
    /// Full-text search.
    pub q: Option<String>,
    /// First letter of the contact name.
    pub letter: Option<String>,
    pub creator_id: Option<u64>,
    pub owner_id: Option<u64>,
    pub is_organization: Option<bool>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub customer_status: Option<String>,
    pub prospect_status: Option<String>,
    pub address: AddressFilter,
    pub list: ListOptions,
}

impl ToQuery for ContactListOptions {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push_str("q", &self.q);
        query.push_str("letter", &self.letter);
        query.push("creator_id", self.creator_id);
        query.push("owner_id", self.owner_id);
        query.push("is_organization", self.is_organization);
        query.push_str("name", &self.name);
        query.push_str("first_name", &self.first_name);
        query.push_str("last_name", &self.last_name);
        query.push_str("customer_status", &self.customer_status);
        query.push_str("prospect_status", &self.prospect_status);
        query.append(&self.address);
        query.append(&self.list);
    }
}

impl Resource for Contact {
    const COLLECTION: &'static str = "v2/contacts";
}

impl Listable for Contact {
    type Options = ContactListOptions;
}

impl Writable for Contact {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn address_filters_are_bracketed() {
        let client = testing::client(200, r#"{"items": [], "meta": {"type": "collection"}}"#);
        let options = ContactListOptions {
            is_organization: Some(false),
            address: AddressFilter {
                city: Some("Hyannis".to_string()),
                postal_code: Some("02601".to_string()),
                country: Some("US".to_string()),
            },
            ..ContactListOptions::default()
        };
        client.contacts().list(Some(&options)).unwrap();

        let url = url::Url::parse(&client.transport().only_request().url).unwrap();
        assert_eq!(url.path(), "/v2/contacts");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("is_organization".to_string(), "false".to_string()),
                ("address[city]".to_string(), "Hyannis".to_string()),
                ("address[postal_code]".to_string(), "02601".to_string()),
                ("address[country]".to_string(), "US".to_string()),
            ]
        );
    }

    #[test]
    fn nested_address_round_trips() {
        let body = r#"{"data": {
            "id": 1,
            "last_name": "Smith",
            "address": {"line1": "2726 Smith Street", "city": "Hyannis", "country": "US"},
            "tags": ["important"]
        }}"#;
        let client = testing::client(200, body);
        let (contact, _) = client.contacts().get(1).unwrap();
        let address = contact.address.unwrap();
        assert_eq!(address.line1.as_deref(), Some("2726 Smith Street"));
        assert_eq!(address.postal_code, None);
        assert_eq!(contact.tags, Some(vec!["important".to_string()]));
    }
}
