//! Generic resource client.
//!
//! # Design
//! One `Service<'a, R, T>` serves every entity. What an entity supports is
//! declared through capability traits on the entity type:
//! - `Listable`: `list` and `get`;
//! - `Writable`: `create`, `edit` and `delete`;
//! - `HasSelf`: `current`, the `{collection}/self` member.
//!
//! Operations missing from an entity's capabilities simply do not exist on
//! its service, so `client.users().create(..)` does not compile.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::{decode, Client, Response};
use crate::envelope::{CollectionRoot, Root, RootRef};
use crate::error::Error;
use crate::http::{HttpMethod, Transport};
use crate::query::{add_options, ToQuery};

/// An entity served from a REST collection.
pub trait Resource: Serialize + DeserializeOwned {
    /// Collection path relative to the base URL, without a leading slash.
    const COLLECTION: &'static str;
}

/// Entities that can be listed and fetched by id.
pub trait Listable: Resource {
    type Options: ToQuery;
}

/// Entities that can be created, edited and deleted.
pub trait Writable: Resource {}

/// Entities with a `self` member describing the authenticated caller.
pub trait HasSelf: Resource {}

/// Resource client bound to the collection of `R`.
pub struct Service<'a, R, T> {
    client: &'a Client<T>,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource, T: Transport> Service<'a, R, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub(crate) fn member_path(id: u64) -> String {
        format!("{}/{id}", R::COLLECTION)
    }

    fn fetch_one(&self, method: HttpMethod, path: &str) -> Result<(R, Response), Error> {
        let request = self.client.new_request(method, path)?;
        let response = self.client.send(&request)?;
        Ok(unwrap_root(decode(response)?))
    }

    fn store_one(&self, method: HttpMethod, path: &str, entity: &R) -> Result<(R, Response), Error> {
        let request = self
            .client
            .new_json_request(method, path, &RootRef { data: entity })?;
        let response = self.client.send(&request)?;
        Ok(unwrap_root(decode(response)?))
    }

    /// Sends a bodiless request whose success is signalled by 204.
    pub(crate) fn expect_no_content(
        &self,
        method: HttpMethod,
        path: &str,
    ) -> Result<(bool, Response), Error> {
        let request = self.client.new_request(method, path)?;
        let response = self.client.send(&request)?;
        Ok((response.is_no_content(), response))
    }
}

impl<R: Listable, T: Transport> Service<'_, R, T> {
    /// GET the collection, one page at a time.
    ///
    /// `options` of `None` sends no query string. Walking further pages is up
    /// to the caller through `ListOptions::page`.
    pub fn list(&self, options: Option<&R::Options>) -> Result<(Vec<R>, Response), Error> {
        let path = add_options(R::COLLECTION, options);
        let request = self.client.new_request(HttpMethod::Get, &path)?;
        let response = self.client.send(&request)?;
        let (root, mut response): (CollectionRoot<R>, Response) = decode(response)?;
        let (items, meta) = root.into_parts();
        response.meta = Some(meta);
        Ok((items, response))
    }

    pub fn get(&self, id: u64) -> Result<(R, Response), Error> {
        self.fetch_one(HttpMethod::Get, &Self::member_path(id))
    }
}

impl<R: Writable, T: Transport> Service<'_, R, T> {
    /// POST `entity` wrapped in `{"data": ...}`; returns the stored entity
    /// including server-assigned fields.
    pub fn create(&self, entity: &R) -> Result<(R, Response), Error> {
        self.store_one(HttpMethod::Post, R::COLLECTION, entity)
    }

    /// PUT the fields set on `changes`; unset fields are left alone.
    pub fn edit(&self, id: u64, changes: &R) -> Result<(R, Response), Error> {
        self.store_one(HttpMethod::Put, &Self::member_path(id), changes)
    }

    /// DELETE the member. `true` only when the API answers 204.
    pub fn delete(&self, id: u64) -> Result<(bool, Response), Error> {
        self.expect_no_content(HttpMethod::Delete, &Self::member_path(id))
    }
}

impl<R: HasSelf, T: Transport> Service<'_, R, T> {
    /// GET `{collection}/self`.
    pub fn current(&self) -> Result<(R, Response), Error> {
        self.fetch_one(HttpMethod::Get, &format!("{}/self", R::COLLECTION))
    }
}

fn unwrap_root<R>((root, mut response): (Root<R>, Response)) -> (R, Response) {
    response.meta = root.meta;
    (root.data, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use crate::types::{Account, Source, SourceListOptions, User};

    const SOURCE: &str = r#"{"data": {"id": 5, "creator_id": 1, "name": "Referral"}, "meta": {"type": "source"}}"#;

    #[test]
    fn list_without_options_sends_no_query() {
        let client = testing::client(200, r#"{"items": [], "meta": {"type": "collection", "count": 0}}"#);
        let (sources, response) = client.sources().list(None).unwrap();
        assert!(sources.is_empty());
        assert_eq!(response.meta.unwrap().count, Some(0));
        let req = client.transport().only_request();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.getbase.com/v2/sources");
    }

    #[test]
    fn list_with_default_options_sends_no_query() {
        let client = testing::client(200, r#"{"items": [], "meta": {"type": "collection"}}"#);
        client
            .sources()
            .list(Some(&SourceListOptions::default()))
            .unwrap();
        assert_eq!(
            client.transport().only_request().url,
            "https://api.getbase.com/v2/sources"
        );
    }

    #[test]
    fn get_returns_data_and_meta() {
        let client = testing::client(200, SOURCE);
        let (source, response) = client.sources().get(5).unwrap();
        assert_eq!(source.id, Some(5));
        assert_eq!(source.name.as_deref(), Some("Referral"));
        assert_eq!(response.meta.unwrap().kind, "source");
        assert_eq!(
            client.transport().only_request().url,
            "https://api.getbase.com/v2/sources/5"
        );
    }

    #[test]
    fn create_wraps_entity_in_data() {
        let client = testing::client(200, SOURCE);
        let input = Source {
            name: Some("Referral".to_string()),
            ..Source::default()
        };
        let (created, _) = client.sources().create(&input).unwrap();
        assert_eq!(created.creator_id, Some(1));

        let req = client.transport().only_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://api.getbase.com/v2/sources");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"data": {"name": "Referral"}}));
    }

    #[test]
    fn edit_sends_only_set_fields() {
        let client = testing::client(200, SOURCE);
        let changes = Source {
            name: Some("Referral".to_string()),
            ..Source::default()
        };
        client.sources().edit(5, &changes).unwrap();

        let req = client.transport().only_request();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "https://api.getbase.com/v2/sources/5");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"data": {"name": "Referral"}}));
    }

    #[test]
    fn delete_is_true_only_on_no_content() {
        let client = testing::client(204, "");
        let (deleted, response) = client.sources().delete(5).unwrap();
        assert!(deleted);
        assert_eq!(response.status(), 204);
        let req = client.transport().only_request();
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());

        let client = testing::client(200, "{}");
        let (deleted, response) = client.sources().delete(5).unwrap();
        assert!(!deleted);
        assert_eq!(response.status(), 200);
    }

    #[test]
    fn delete_surfaces_api_errors() {
        let client = testing::client(404, "");
        let err = client.sources().delete(5).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn current_hits_self_member() {
        let client = testing::client(200, r#"{"data": {"id": 1, "name": "Mark", "confirmed": true}}"#);
        let (me, _) = client.users().current().unwrap();
        assert_eq!(me.confirmed, Some(true));
        assert_eq!(
            client.transport().only_request().url,
            "https://api.getbase.com/v2/users/self"
        );

        let client = testing::client(200, r#"{"data": {"id": 1, "name": "Acme", "plan": "enterprise"}}"#);
        let (account, _): (Account, _) = client.accounts().current().unwrap();
        assert_eq!(account.plan.as_deref(), Some("enterprise"));
        assert_eq!(
            client.transport().only_request().url,
            "https://api.getbase.com/v2/accounts/self"
        );
    }

    #[test]
    fn list_decode_failure_is_reported() {
        let client = testing::client(200, r#"{"data": {"id": 1}}"#);
        let err = client.users().list(None).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn users_list_projects_items() {
        let client = testing::client(
            200,
            r#"{"items": [{"data": {"id": 1}, "meta": {"type": "user"}}, {"data": {"id": 2}, "meta": {"type": "user"}}],
                "meta": {"type": "collection", "count": 2}}"#,
        );
        let (users, _): (Vec<User>, _) = client.users().list(None).unwrap();
        let ids: Vec<_> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }
}
