//! Binding matched path parameters to a route entry.

use std::collections::HashMap;

use crate::routing::table::{Resource, RouteEntry};

/// Path parameters resolved against the names a route entry declares.
///
/// The record's own `id` and the parent-scope id are kept apart so a nested
/// member route never confuses the two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    /// Raw value of `:id`, when the route has one.
    pub id: Option<String>,
    /// Parent resource and raw id, when the route is nested.
    pub parent: Option<(Resource, String)>,
}

impl RouteParams {
    /// `raw` is keyed by the positional capture names of
    /// [`RouteEntry::axum_path`]; they are renamed to the declared names first.
    pub fn bind(entry: &RouteEntry, mut raw: HashMap<String, String>) -> Self {
        let mut named: HashMap<&str, String> = entry
            .captures()
            .into_iter()
            .filter_map(|(capture, name)| raw.remove(&capture).map(|value| (name, value)))
            .collect();

        let parent = entry.parent.as_ref().and_then(|scope| {
            named
                .remove(scope.param.as_str())
                .map(|value| (scope.resource, value))
        });

        Self {
            id: named.remove("id"),
            parent,
        }
    }

    /// The record id, if present and numeric.
    pub fn id(&self) -> Option<u64> {
        self.id.as_deref().and_then(parse_id)
    }
}

/// Parse a path segment as a record id. Anything non-numeric is no id at all.
pub fn parse_id(raw: &str) -> Option<u64> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::table::RouteTable;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_nested_member_binds_both_ids() {
        let table = RouteTable::standard().unwrap();
        let entry = table.find("GET", "/dog_houses/:dog_house_id/reviews/:id").unwrap();

        let params = RouteParams::bind(entry, raw(&[("seg2", "1"), ("seg4", "10")]));
        assert_eq!(params.id(), Some(10));
        assert_eq!(params.parent, Some((Resource::DogHouses, "1".to_string())));
    }

    #[test]
    fn test_top_level_route_has_no_parent() {
        let table = RouteTable::standard().unwrap();
        let entry = table.find("GET", "/reviews/:id").unwrap();

        let params = RouteParams::bind(entry, raw(&[("seg2", "abc")]));
        assert_eq!(params.id.as_deref(), Some("abc"));
        assert_eq!(params.id(), None);
        assert!(params.parent.is_none());
    }

    #[test]
    fn test_member_route_id_shares_parent_capture() {
        let table = RouteTable::standard().unwrap();
        let entry = table.find("GET", "/dog_houses/:id").unwrap();

        let params = RouteParams::bind(entry, raw(&[("seg2", "2")]));
        assert_eq!(params.id(), Some(2));
        assert!(params.parent.is_none());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id(""), None);
    }
}
