//! Marshaling options shared by every adapter of a registry.

use core::fmt;

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// MatchPolicy

/// How a subtype candidate treats keys it does not declare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Unknown keys are ignored; only the required attributes must be present.
    #[default]
    Open,
    /// Every present key must be an attribute of the candidate.
    Exact,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.pad("open"),
            Self::Exact => f.pad("exact"),
        }
    }
}

// -----------------------------------------------------------------------------
// MarshalConfig

/// Options applied by a [`MarshalRegistry`](crate::registry::MarshalRegistry).
///
/// Missing fields take their default when deserialized, so a partial
/// document is a valid configuration.
///
/// # Examples
///
/// ```
/// use mx_marshal::{MarshalConfig, MatchPolicy};
///
/// let config: MarshalConfig = serde_json::from_str(r#"{ "serialize_nulls": true }"#).unwrap();
/// assert!(config.serialize_nulls);
/// assert_eq!(config.match_policy, MatchPolicy::Open);
///
/// let config = MarshalConfig::new().with_match_policy(MatchPolicy::Exact);
/// assert!(!config.serialize_nulls);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MarshalConfig {
    /// Write `null` and empty arrays instead of omitting the attribute.
    pub serialize_nulls: bool,
    /// Key tolerance used by the structural resolver.
    pub match_policy: MatchPolicy,
}

impl MarshalConfig {
    /// Nulls omitted, open-world matching.
    #[inline]
    pub const fn new() -> Self {
        Self {
            serialize_nulls: false,
            match_policy: MatchPolicy::Open,
        }
    }

    #[inline]
    pub const fn with_serialize_nulls(mut self, serialize_nulls: bool) -> Self {
        self.serialize_nulls = serialize_nulls;
        self
    }

    #[inline]
    pub const fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{MarshalConfig, MatchPolicy};

    #[test]
    fn default_matches_new() {
        assert_eq!(MarshalConfig::default(), MarshalConfig::new());
    }

    #[test]
    fn json_round_trip() {
        let config = MarshalConfig::new()
            .with_serialize_nulls(true)
            .with_match_policy(MatchPolicy::Exact);

        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(text, r#"{"serialize_nulls":true,"match_policy":"exact"}"#);

        let back: MarshalConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn empty_document_is_default() {
        let config: MarshalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MarshalConfig::default());
    }
}
