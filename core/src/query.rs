//! Query-string encoding for list options.
//!
//! Each list-options struct implements `ToQuery` by pushing its populated
//! fields into a `QueryBuilder`. Unset values, empty strings and empty lists
//! are skipped; lists are comma-joined.

use std::fmt::Display;

use url::form_urlencoded;

/// Pagination and selection parameters shared by every list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page of results to retrieve, starting at 1.
    pub page: Option<u32>,
    /// Number of results per page.
    pub per_page: Option<u32>,
    /// Only return resources with these ids.
    pub ids: Vec<u64>,
    /// Sort specification, e.g. `name:desc`.
    pub sort_by: Vec<String>,
}

impl ToQuery for ListOptions {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push("page", self.page);
        query.push("per_page", self.per_page);
        query.push_list("ids", &self.ids);
        query.push_list("sort_by", &self.sort_by);
    }
}

/// Address filters, encoded with bracket names (`address[city]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFilter {
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl ToQuery for AddressFilter {
    fn append_query(&self, query: &mut QueryBuilder) {
        query.push_str("address[city]", &self.city);
        query.push_str("address[postal_code]", &self.postal_code);
        query.push_str("address[country]", &self.country);
    }
}

/// A value that can be translated into query parameters.
pub trait ToQuery {
    fn append_query(&self, query: &mut QueryBuilder);
}

/// Ordered collection of query parameters.
#[derive(Debug, Default)]
pub struct QueryBuilder {
    pairs: Vec<(&'static str, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `name=value` when `value` is set.
    pub fn push<V: Display>(&mut self, name: &'static str, value: Option<V>) {
        if let Some(value) = value {
            self.pairs.push((name, value.to_string()));
        }
    }

    /// Pushes `name=value` when `value` is set and non-empty.
    pub fn push_str(&mut self, name: &'static str, value: &Option<String>) {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            self.pairs.push((name, value.to_string()));
        }
    }

    /// Pushes `name=a,b,c` when `values` is non-empty.
    pub fn push_list<V: Display>(&mut self, name: &'static str, values: &[V]) {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.pairs.push((name, joined));
    }

    pub fn append<Q: ToQuery + ?Sized>(&mut self, options: &Q) {
        options.append_query(self);
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-urlencodes the collected pairs, `None` when there are none.
    pub fn encode(&self) -> Option<String> {
        if self.pairs.is_empty() {
            return None;
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.pairs {
            serializer.append_pair(name, value);
        }
        Some(serializer.finish())
    }
}

/// Appends the encoded `options` to `path`.
///
/// Returns `path` unchanged when `options` is `None` or has nothing set.
pub fn add_options<Q: ToQuery + ?Sized>(path: &str, options: Option<&Q>) -> String {
    let Some(options) = options else {
        return path.to_string();
    };
    let mut query = QueryBuilder::new();
    query.append(options);
    match query.encode() {
        Some(encoded) => format!("{path}?{encoded}"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_leaves_path_untouched() {
        assert_eq!(add_options::<ListOptions>("v2/deals", None), "v2/deals");
    }

    #[test]
    fn empty_options_leave_path_untouched() {
        assert_eq!(
            add_options("v2/deals", Some(&ListOptions::default())),
            "v2/deals"
        );
    }

    #[test]
    fn lists_are_comma_joined() {
        let options = ListOptions {
            page: Some(1),
            per_page: Some(25),
            ids: vec![1, 2, 3],
            sort_by: vec!["name:desc".to_string(), "created_at:asc".to_string()],
        };
        let mut query = QueryBuilder::new();
        query.append(&options);
        assert_eq!(
            query.pairs(),
            &[
                ("page", "1".to_string()),
                ("per_page", "25".to_string()),
                ("ids", "1,2,3".to_string()),
                ("sort_by", "name:desc,created_at:asc".to_string()),
            ]
        );
        assert_eq!(
            add_options("v2/deals", Some(&options)),
            "v2/deals?page=1&per_page=25&ids=1%2C2%2C3&sort_by=name%3Adesc%2Ccreated_at%3Aasc"
        );
    }

    #[test]
    fn address_filter_uses_brackets() {
        let filter = AddressFilter {
            city: Some("Hyannis".to_string()),
            postal_code: Some(String::new()),
            country: Some("US".to_string()),
        };
        let mut query = QueryBuilder::new();
        query.append(&filter);
        assert_eq!(
            query.pairs(),
            &[
                ("address[city]", "Hyannis".to_string()),
                ("address[country]", "US".to_string()),
            ]
        );
    }

    #[test]
    fn empty_strings_and_lists_are_skipped() {
        let mut query = QueryBuilder::new();
        query.push_str("name", &Some(String::new()));
        query.push_str("email", &None);
        query.push_list::<u64>("ids", &[]);
        query.push::<bool>("hot", None);
        assert!(query.is_empty());
        assert_eq!(query.encode(), None);
    }

    #[test]
    fn explicit_false_is_encoded() {
        let mut query = QueryBuilder::new();
        query.push("hot", Some(false));
        assert_eq!(query.encode().as_deref(), Some("hot=false"));
    }
}
