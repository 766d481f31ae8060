//! Best-effort user geolocation
//!
//! Location is cosmetic context for the backend. Nothing here is allowed to
//! fail the analysis: every error collapses into the placeholder location.

use crate::api::transport::Transport;
use crate::errors::ApiResult;
use crate::types::location::{UNKNOWN_COUNTRY_CODE, UNKNOWN_PLACE};
use crate::types::UserLocation;
use serde::Deserialize;
use tracing::{debug, warn};

/// Subset of the ipapi.co JSON response the client cares about
#[derive(Debug, Default, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
}

/// Parse a geolocation body, defaulting each missing field individually
pub fn parse_location(body: &str) -> ApiResult<UserLocation> {
    let response: IpApiResponse = serde_json::from_str(body)?;
    Ok(UserLocation {
        city: response.city.unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
        country: response
            .country_name
            .unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
        country_code: response
            .country_code
            .unwrap_or_else(|| UNKNOWN_COUNTRY_CODE.to_string()),
    })
}

/// Look up the caller's approximate location
///
/// The HTTP status is deliberately ignored: rate-limit responses from the
/// service are JSON too and simply lack the fields, which yields placeholders.
pub async fn locate<T: Transport + ?Sized>(transport: &T, url: &str) -> UserLocation {
    let body = match transport.get(url).await {
        Ok(response) => response.body,
        Err(e) => {
            warn!("Error getting location data: {}", e);
            return UserLocation::unknown();
        }
    };

    match parse_location(&body) {
        Ok(location) => {
            debug!("Located user at {}", location);
            location
        }
        Err(e) => {
            warn!("Error getting location data: {}", e);
            UserLocation::unknown()
        }
    }
}
