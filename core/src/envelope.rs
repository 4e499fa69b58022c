//! JSON envelopes wrapping every entity on the wire.
//!
//! A single resource travels as `{"data": {...}, "meta": {"type": "deal"}}`,
//! a collection as `{"items": [<single envelope>...], "meta": {...}}`.

use serde::{Deserialize, Serialize};

/// Response metadata. `count` and `links` are only present on collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Pagination links of a collection response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(rename = "first_page", default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(rename = "last_page", default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(rename = "prev_page", default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(rename = "next_page", default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Single-resource envelope as decoded from a response.
#[derive(Debug, Clone, Deserialize)]
pub struct Root<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<Meta>,
}

/// Single-resource envelope borrowed for a request body.
#[derive(Debug, Serialize)]
pub(crate) struct RootRef<'a, T> {
    pub data: &'a T,
}

/// Collection envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionRoot<T> {
    pub items: Vec<Root<T>>,
    #[serde(default)]
    pub meta: Meta,
}

impl<T> CollectionRoot<T> {
    /// Projects the `data` of every item, keeping server order, and hands
    /// back the collection meta alongside.
    pub fn into_parts(self) -> (Vec<T>, Meta) {
        let meta = self.meta;
        let items = self.items.into_iter().map(|root| root.data).collect();
        (items, meta)
    }
}
