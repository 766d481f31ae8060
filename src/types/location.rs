use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used for any location field that could not be determined
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Placeholder country code, as understood by the backend
pub const UNKNOWN_COUNTRY_CODE: &str = "XX";

/// Approximate user location sent alongside each analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLocation {
    pub city: String,
    pub country: String,
    pub country_code: String,
}

impl UserLocation {
    /// The constant `{"Unknown", "Unknown", "XX"}` placeholder
    pub fn unknown() -> Self {
        Self {
            city: UNKNOWN_PLACE.to_string(),
            country: UNKNOWN_PLACE.to_string(),
            country_code: UNKNOWN_COUNTRY_CODE.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::unknown()
    }
}

impl Default for UserLocation {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for UserLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} ({})", self.city, self.country, self.country_code)
    }
}
