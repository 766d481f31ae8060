//! Fixed request headers
//!
//! The backend sits behind a CORS-aware front door that expects browser-like
//! requests from the buyeuropean.io origin. Every POST carries the same
//! header set, built once when the client is constructed.

use crate::config::ClientConfig;
use crate::errors::{ApiError, ApiResult};
use crate::platform::current_platform_label;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// User agent and client-hint values identifying this desktop client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserIdentity {
    pub user_agent: String,
    pub sec_ch_ua: String,
    pub sec_ch_ua_mobile: String,
    pub sec_ch_ua_platform: String,
}

impl BrowserIdentity {
    /// Build the identity for a given platform label
    ///
    /// # Example
    /// ```
    /// use buyeuropean::api::BrowserIdentity;
    ///
    /// let identity = BrowserIdentity::new("BuyEuropean", "1.0.0", "macOS");
    /// assert_eq!(identity.user_agent, "BuyEuropean Desktop Client (macOS) 1.0.0");
    /// assert_eq!(identity.sec_ch_ua_platform, "\"macOS\"");
    /// ```
    pub fn new(app_name: &str, version: &str, platform: &str) -> Self {
        Self {
            user_agent: format!("{} Desktop Client ({}) {}", app_name, platform, version),
            sec_ch_ua: format!("\"{} Desktop\";v=\"1\"", app_name),
            sec_ch_ua_mobile: "?0".to_string(),
            sec_ch_ua_platform: format!("\"{}\"", platform),
        }
    }

    pub fn for_current_platform(config: &ClientConfig) -> Self {
        Self::new(&config.app_name, &config.version, &current_platform_label())
    }
}

/// Ordered header pairs sent with every analysis and feedback request
pub fn header_pairs(identity: &BrowserIdentity, origin: &str) -> Vec<(&'static str, String)> {
    let origin = origin.trim_end_matches('/');
    vec![
        ("accept", "*/*".to_string()),
        ("accept-language", "en-US,en;q=0.9".to_string()),
        ("content-type", "application/json".to_string()),
        ("origin", origin.to_string()),
        ("priority", "u=1, i".to_string()),
        ("referer", format!("{}/", origin)),
        ("sec-ch-ua", identity.sec_ch_ua.clone()),
        ("sec-ch-ua-mobile", identity.sec_ch_ua_mobile.clone()),
        ("sec-ch-ua-platform", identity.sec_ch_ua_platform.clone()),
        ("sec-fetch-dest", "empty".to_string()),
        ("sec-fetch-mode", "cors".to_string()),
        ("sec-fetch-site", "cross-site".to_string()),
        ("user-agent", identity.user_agent.clone()),
    ]
}

/// Convert the header pairs into a reqwest `HeaderMap`
pub fn build_headers(identity: &BrowserIdentity, origin: &str) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in header_pairs(identity, origin) {
        let value = HeaderValue::from_str(&value).map_err(|e| ApiError::InvalidHeader {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(headers)
}
