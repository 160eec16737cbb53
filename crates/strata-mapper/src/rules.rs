use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use strata_protocol::{BedrockPacket, PacketKind};
use strata_types::VersionName;

/// A conversion rule body: pure function from a packet to its rewritten
/// form. Rules receive the packet by value and give one back, so they may
/// rewrite in place without cloning.
pub type ConversionFn = dyn Fn(BedrockPacket) -> BedrockPacket + Send + Sync;

/// Exact-pair key for a directed conversion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub kind: PacketKind,
    pub from: VersionName,
    pub to: VersionName,
}

impl RuleKey {
    pub fn new(kind: PacketKind, from: VersionName, to: VersionName) -> Self {
        Self { kind, from, to }
    }
}

impl std::fmt::Display for RuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.kind, self.from, self.to)
    }
}

/// Directed conversion rules under exact (kind, from, to) lookup.
///
/// There is no transitive composition: a 1.21.10→1.21.20 rule plus a
/// 1.21.20→1.21.30 rule never yields a 1.21.10→1.21.30 conversion. Pairs
/// that matter get their own registration.
#[derive(Default)]
pub struct RuleSet {
    rules: RwLock<HashMap<RuleKey, Arc<ConversionFn>>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule; a duplicate key overwrites silently.
    pub fn insert(&self, key: RuleKey, rule: Arc<ConversionFn>) {
        self.rules.write().unwrap().insert(key, rule);
    }

    pub fn get(&self, key: &RuleKey) -> Option<Arc<ConversionFn>> {
        self.rules.read().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.rules.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
