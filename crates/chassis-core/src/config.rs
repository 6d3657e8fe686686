//! Client Configuration
//!
//! Backend location, page sizes and registration company code.

use serde::{Deserialize, Serialize};

use crate::domain::{ClientError, ClientResult};

/// Settings shared by the API client and every listing controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// REST backend root, e.g. `http://host:5200`
    pub api_base_url: String,
    /// Root for static files (`chassis/...`, `plan/...`, `rpt/pdf/...`).
    /// `None` keeps them relative to the page origin.
    pub asset_base_url: Option<String>,
    pub version: String,
    /// Code a new user must enter to register
    pub company_code: String,
    pub plan_page_size: u32,
    pub weight_cert_page_size: u32,
    pub cmh_page_size: u32,
    /// Size of the superset page fetched by a search
    pub search_page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://hongsenghq.ddns.net:5200".to_string(),
            asset_base_url: None,
            version: "v4.0.1".to_string(),
            company_code: "hsgonline".to_string(),
            plan_page_size: 100,
            weight_cert_page_size: 100,
            cmh_page_size: 30,
            search_page_size: 1000,
        }
    }
}

impl ClientConfig {
    /// Parse a JSON document; missing keys take their defaults
    pub fn from_json(json: &str) -> ClientResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ClientError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_asset_base_url(mut self, url: impl Into<String>) -> Self {
        self.asset_base_url = Some(url.into());
        self
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ClientError::InvalidConfig("api_base_url is empty".to_string()));
        }
        let sizes = [
            ("plan_page_size", self.plan_page_size),
            ("weight_cert_page_size", self.weight_cert_page_size),
            ("cmh_page_size", self.cmh_page_size),
            ("search_page_size", self.search_page_size),
        ];
        for (name, size) in sizes {
            if size == 0 {
                return Err(ClientError::InvalidConfig(format!("{} must be positive", name)));
            }
        }
        Ok(())
    }

    /// Absolute URL for a backend path
    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }

    /// URL for a static file path; stays relative without an asset root
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        match &self.asset_base_url {
            Some(base) => join_url(base, path),
            None => path.to_string(),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.plan_page_size, 100);
        assert_eq!(config.cmh_page_size, 30);
        assert_eq!(config.search_page_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ClientConfig::from_json(r#"{"api_base_url": "http://localhost:5200/", "cmh_page_size": 10}"#)
            .expect("valid config");
        assert_eq!(config.cmh_page_size, 10);
        assert_eq!(config.plan_page_size, 100);
        assert_eq!(config.api_url("plans"), "http://localhost:5200/plans");
        assert_eq!(config.api_url("/users/authenticate"), "http://localhost:5200/users/authenticate");
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = ClientConfig::from_json(r#"{"plan_page_size": 0}"#).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig(msg) if msg.contains("plan_page_size")));
    }

    #[test]
    fn test_asset_url() {
        let relative = ClientConfig::default();
        assert_eq!(relative.asset_url("chassis/a.jpg"), "chassis/a.jpg");

        let rooted = ClientConfig::default().with_asset_base_url("https://files.example.com/");
        assert_eq!(rooted.asset_url("chassis/a.jpg"), "https://files.example.com/chassis/a.jpg");
        assert_eq!(rooted.asset_url("http://elsewhere/x.pdf"), "http://elsewhere/x.pdf");
    }
}
