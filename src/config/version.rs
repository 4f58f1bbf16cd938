//! Admin API version selection.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Shopify Admin API version used in request paths.
///
/// Shopify releases quarterly (January, April, July, October). Versions not
/// listed here parse into [`ApiVersion::Custom`] as long as they follow the
/// `YYYY-MM` release format.
///
/// ```rust
/// use shopify_tables::ApiVersion;
///
/// let version: ApiVersion = "2025-07".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2025_07);
/// assert_eq!(ApiVersion::latest().to_string(), "2025-10");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2025-01
    V2025_01,
    /// API version 2025-04
    V2025_04,
    /// API version 2025-07
    V2025_07,
    /// API version 2025-10
    V2025_10,
    /// The unstable development version.
    Unstable,
    /// Any other version in `YYYY-MM` format.
    Custom(String),
}

impl ApiVersion {
    /// Returns the version used when a connection does not name one.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    fn is_release_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };

        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && matches!(month, "01" | "04" | "07" | "10")
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_release_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
