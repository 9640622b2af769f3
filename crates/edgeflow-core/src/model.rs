//! Identifiers and version snapshots

use crate::error::{CoreError, Result};
use serde::Deserialize;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Rejects empty or whitespace-only values; surrounding whitespace is trimmed
            pub fn new(id: impl AsRef<str>) -> Result<Self> {
                let id = id.as_ref().trim();
                if id.is_empty() {
                    return Err(CoreError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(id.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }
    };
}

identifier!(
    /// Security configuration identifier
    ConfigId,
    "config id"
);

identifier!(
    /// Security policy identifier within a configuration
    PolicyId,
    "security policy id"
);

/// Editable snapshot of a configuration
///
/// Resolved once per run; every mutation and verification call of that run
/// targets the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(NonZeroU32);

impl Version {
    /// `None` for zero, negative or out-of-range values
    pub fn new(version: i64) -> Option<Self> {
        u32::try_from(version)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `GET /appsec/v1/configs/{configId}/versions`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigVersion {
    #[serde(default)]
    pub config_id: i64,
    #[serde(default)]
    pub config_name: String,
    pub last_created_version: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_id_trims() {
        let id = ConfigId::new(" 12345 ").unwrap();
        assert_eq!(id.as_str(), "12345");
        assert_eq!(id.to_string(), "12345");
    }

    #[test]
    fn test_empty_identifiers_rejected() {
        assert!(matches!(
            ConfigId::new(""),
            Err(CoreError::EmptyIdentifier { kind: "config id" })
        ));
        assert!(matches!(
            "   ".parse::<PolicyId>(),
            Err(CoreError::EmptyIdentifier {
                kind: "security policy id"
            })
        ));
    }

    #[test]
    fn test_version_must_be_positive() {
        assert_eq!(Version::new(7).map(|v| v.get()), Some(7));
        assert!(Version::new(0).is_none());
        assert!(Version::new(-3).is_none());
        assert!(Version::new(i64::from(u32::MAX) + 1).is_none());
    }

    #[test]
    fn test_config_version_ignores_extra_fields() {
        let body = r#"{
            "configId": 12345,
            "configName": "www.example.com",
            "lastCreatedVersion": 5,
            "stagingActiveVersion": 3,
            "versionList": []
        }"#;

        let parsed: ConfigVersion = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.config_id, 12345);
        assert_eq!(parsed.config_name, "www.example.com");
        assert_eq!(parsed.last_created_version, 5);
    }

    #[test]
    fn test_config_version_requires_last_created_version() {
        let result = serde_json::from_str::<ConfigVersion>(r#"{"configId": 1}"#);
        assert!(result.is_err());
    }
}
