//! Strategy identity — deterministic fingerprint of a configuration.
//!
//! The external store records which strategy opened a position; the exit
//! engine only acts on positions whose recorded identity matches its own.
//! Identity is the configuration name plus a BLAKE3 hash of the canonical
//! serialization, so two evaluators only share positions when their whole
//! configuration agrees.

use crate::config::StrategyConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic strategy identity (name + configuration hash prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrategyId(pub String);

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StrategyConfig {
    /// Stable identity for this configuration.
    ///
    /// Canonical serde_json serialization keeps the hash deterministic
    /// across platforms and builds.
    pub fn fingerprint(&self) -> StrategyId {
        let json = serde_json::to_string(self).expect("StrategyConfig must serialize");
        let hash = blake3::hash(json.as_bytes()).to_hex();
        StrategyId(format!("{}:{}", self.name, &hash.as_str()[..16]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StrategyConfig {
        StrategyConfig::day_trade("momentum_long", 0.01).unwrap()
    }

    #[test]
    fn fingerprint_is_deterministic() {
        assert_eq!(config().fingerprint(), config().fingerprint());
    }

    #[test]
    fn fingerprint_changes_with_parameters() {
        let a = StrategyConfig::day_trade("momentum_long", 0.01).unwrap();
        let b = StrategyConfig::day_trade("momentum_long", 0.02).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_carries_the_name() {
        let id = config().fingerprint();
        assert!(id.0.starts_with("momentum_long:"));
    }

    #[test]
    fn strategy_id_roundtrip() {
        let id = config().fingerprint();
        let json = serde_json::to_string(&id).unwrap();
        let deser: StrategyId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deser);
    }
}
