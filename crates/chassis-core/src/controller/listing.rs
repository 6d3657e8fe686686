//! Listing Configurations
//!
//! A `ListingSpec` is everything that differs between listing screens:
//! endpoint, page sizes and how each search field reaches the backend.

use crate::config::ClientConfig;
use crate::domain::filter::MatchKind;

pub const PLANS: &str = "plans";
pub const WEIGHT_CERTS: &str = "weightCerts";
pub const CHASSIS_HISTORY: &str = "cmh";

/// Generic backend search parameter
const SEARCH_PARAM: &str = "search";

/// One advanced-search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField {
    /// Record field used for local matching
    pub name: &'static str,
    pub label: &'static str,
    /// Backend query parameter, `None` for local-only fields
    pub param: Option<&'static str>,
    pub kind: MatchKind,
}

impl SearchField {
    pub fn remote(name: &'static str, label: &'static str, param: &'static str) -> Self {
        Self { name, label, param: Some(param), kind: MatchKind::Substring }
    }

    pub fn local(name: &'static str, label: &'static str) -> Self {
        Self { name, label, param: None, kind: MatchKind::Substring }
    }

    pub fn with_kind(mut self, kind: MatchKind) -> Self {
        self.kind = kind;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSpec {
    pub endpoint: &'static str,
    pub page_size: u32,
    /// Size of the one-shot superset fetched by a search
    pub search_size: u32,
    /// Parameter carrying the simple query; `None` searches loaded rows locally
    pub simple_param: Option<&'static str>,
    /// Fields a simple query is matched against locally
    pub simple_fields: Vec<&'static str>,
    pub fields: Vec<SearchField>,
    /// Searches fetch `page=1&size=page_size` and keep paginating
    pub paginate_search: bool,
}

impl ListingSpec {
    pub fn new(endpoint: &'static str, page_size: u32, search_size: u32) -> Self {
        Self {
            endpoint,
            page_size,
            search_size,
            simple_param: None,
            simple_fields: Vec::new(),
            fields: Vec::new(),
            paginate_search: false,
        }
    }

    pub fn with_simple_param(mut self, param: &'static str) -> Self {
        self.simple_param = Some(param);
        self
    }

    pub fn with_simple_fields(mut self, fields: &[&'static str]) -> Self {
        self.simple_fields = fields.to_vec();
        self
    }

    pub fn with_field(mut self, field: SearchField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_paginated_search(mut self) -> Self {
        self.paginate_search = true;
        self
    }

    pub fn field(&self, name: &str) -> Option<&SearchField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_advanced_search(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Building plans
    pub fn plans(config: &ClientConfig) -> Self {
        Self::new(PLANS, config.plan_page_size, config.search_page_size)
            .with_simple_param(SEARCH_PARAM)
            .with_simple_fields(&["plan_id", "model_id", "make", "body_type", "wheelbase"])
            .with_field(SearchField::remote("model_id", "Model ID", SEARCH_PARAM))
            .with_field(SearchField::remote("body_type", "Body Type", "body_type"))
            .with_field(SearchField::remote("wheelbase", "Wheelbase", "wheelbase").with_kind(MatchKind::Wheelbase))
    }

    /// Weight certificates
    pub fn weight_certs(config: &ClientConfig) -> Self {
        Self::new(WEIGHT_CERTS, config.weight_cert_page_size, config.search_page_size)
            .with_simple_param(SEARCH_PARAM)
            .with_simple_fields(&["mgroup_id", "make", "model_id", "wheelbase", "bdm_w", "bdm_e", "axle"])
            .with_field(SearchField::remote("wheelbase", "Wheelbase", "wheelbase").with_kind(MatchKind::Wheelbase))
            .with_field(SearchField::remote("axle", "Axle", "axle"))
    }

    /// Chassis movement history: searched locally while paging continues
    pub fn chassis_history(config: &ClientConfig) -> Self {
        Self::new(CHASSIS_HISTORY, config.cmh_page_size, config.search_page_size)
            .with_simple_fields(&["stock_id", "item_id", "mgroup_id", "customer", "status", "location", "createdt"])
            .with_paginated_search()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let config = ClientConfig::default();

        let plans = ListingSpec::plans(&config);
        assert_eq!(plans.endpoint, "plans");
        assert_eq!(plans.page_size, 100);
        assert_eq!(plans.field("model_id").and_then(|f| f.param), Some("search"));
        assert_eq!(plans.field("wheelbase").map(|f| f.kind), Some(MatchKind::Wheelbase));

        let certs = ListingSpec::weight_certs(&config);
        assert_eq!(certs.endpoint, "weightCerts");
        assert_eq!(certs.fields.len(), 2);

        let cmh = ListingSpec::chassis_history(&config);
        assert_eq!(cmh.page_size, 30);
        assert_eq!(cmh.simple_param, None);
        assert!(!cmh.has_advanced_search());
        assert!(cmh.simple_fields.contains(&"createdt"));
    }
}
