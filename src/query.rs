use serde::Serialize;

pub const ACTION: &str = "opensearch";

/// Parameters for a single opensearch call. Only `search` varies.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OpenSearchQuery {
    action: &'static str,
    pub search: String,
    limit: u32,
    redirects: &'static str,
    format: &'static str,
}

impl OpenSearchQuery {
    pub fn new(search: impl Into<String>) -> Self {
        OpenSearchQuery {
            action: ACTION,
            search: search.into(),
            limit: 1,
            redirects: "resolve",
            format: "json",
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Key/value pairs in the order they go on the query string.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("action", self.action.to_string()),
            ("search", self.search.clone()),
            ("limit", self.limit.to_string()),
            ("redirects", self.redirects.to_string()),
            ("format", self.format.to_string()),
        ]
    }
}

#[test]
fn test_query_params() {
    let query = OpenSearchQuery::new("albert einstein");
    assert_eq!(
        query.params(),
        vec![
            ("action", "opensearch".to_string()),
            ("search", "albert einstein".to_string()),
            ("limit", "1".to_string()),
            ("redirects", "resolve".to_string()),
            ("format", "json".to_string()),
        ]
    );
    assert_eq!(query.limit(), 1);
}

#[test]
fn test_empty_search_is_allowed() {
    let query = OpenSearchQuery::new("");
    assert_eq!(query.search, "");
    assert_eq!(query.params()[1], ("search", String::new()));
}
