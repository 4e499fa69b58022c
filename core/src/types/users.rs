use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::{ListOptions, QueryBuilder, ToQuery};
use crate::service::{HasSelf, Listable, Resource};

/// A user of the account. Users are read-only through the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// `active` or `inactive`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// `user` or `admin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListOptions {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub confirmed: Option<bool>,
    pub list: ListOptions,
}

impl ToQuery for UserListOptions {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push_str("name", &self.name);
        query.push_str("email", &self.email);
        query.push_str("role", &self.role);
        query.push_str("status", &self.status);
        query.push("confirmed", self.confirmed);
        query.append(&self.list);
    }
}

impl Resource for User {
    const COLLECTION: &'static str = "v2/users";
}

impl Listable for User {
    type Options = UserListOptions;
}

impl HasSelf for User {}
