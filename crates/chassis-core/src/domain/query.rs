//! Page Query
//!
//! One listing request: endpoint, optional page number, page size and
//! filter parameters, in the order the backend expects them.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub endpoint: String,
    /// `None` for a superset search fetch
    pub page: Option<u32>,
    pub size: u32,
    pub params: Vec<(String, String)>,
}

impl PageQuery {
    /// `GET <endpoint>?page=<n>&size=<size>`
    pub fn page(endpoint: &str, page: u32, size: u32) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            page: Some(page),
            size,
            params: Vec::new(),
        }
    }

    /// `GET <endpoint>?size=<size>`, used for search supersets
    pub fn superset(endpoint: &str, size: u32) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            page: None,
            size,
            params: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Query-string pairs in request order
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len() + 2);
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        pairs.push(("size".to_string(), self.size.to_string()));
        pairs.extend(self.params.iter().cloned());
        pairs
    }

    /// `endpoint?page=1&size=100&...`, for logs
    pub fn path_and_query(&self) -> String {
        let query = self
            .pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, NON_ALPHANUMERIC)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.endpoint, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_order() {
        let query = PageQuery::page("plans", 2, 100)
            .with_params(vec![("body_type".to_string(), "flat bed".to_string())]);
        assert_eq!(query.path_and_query(), "plans?page=2&size=100&body_type=flat%20bed");
        assert_eq!(query.param("body_type"), Some("flat bed"));
        assert_eq!(query.param("search"), None);
    }

    #[test]
    fn test_superset_has_no_page() {
        let query = PageQuery::superset("plans", 1000)
            .with_params(vec![("search".to_string(), "isuzu".to_string())]);
        assert_eq!(query.path_and_query(), "plans?size=1000&search=isuzu");
    }
}
