use std::collections::BTreeMap;
use std::sync::RwLock;
use strata_types::{ProtocolVersion, VersionName};
use tracing::warn;

/// Runtime overlay of protocol → version-name entries layered over the
/// built-in table.
///
/// The registry is owned by whoever constructs the [`crate::VersionTable`]
/// and handed in at build time, so two tables never share entries by
/// accident. Populate it during startup: entries registered after lookups
/// have begun are visible, but there is no ordering guarantee against
/// concurrent readers. Entries are never removed.
#[derive(Debug, Default)]
pub struct VersionRegistry {
    entries: RwLock<BTreeMap<ProtocolVersion, VersionName>>,
}

impl VersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom mapping. Re-registering a protocol identifier
    /// replaces the earlier entry and logs the replacement.
    pub fn register(&self, protocol: ProtocolVersion, name: VersionName) {
        let mut entries = self.entries.write().unwrap();
        if let Some(previous) = entries.insert(protocol, name) {
            warn!("custom version for protocol {protocol} replaced: {previous} -> {name}");
        }
    }

    pub fn get(&self, protocol: ProtocolVersion) -> Option<VersionName> {
        self.entries.read().unwrap().get(&protocol).copied()
    }

    /// Snapshot of all registered entries in ascending protocol order.
    pub fn entries(&self) -> Vec<(ProtocolVersion, VersionName)> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .map(|(p, v)| (*p, *v))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let registry = VersionRegistry::new();
        assert!(registry.is_empty());
        registry.register(ProtocolVersion(800), VersionName::new(1, 22, 0));
        assert_eq!(
            registry.get(ProtocolVersion(800)),
            Some(VersionName::new(1, 22, 0))
        );
        assert_eq!(registry.get(ProtocolVersion(801)), None);
    }

    #[test]
    fn test_reregistration_replaces() {
        let registry = VersionRegistry::new();
        registry.register(ProtocolVersion(800), VersionName::new(1, 22, 0));
        registry.register(ProtocolVersion(800), VersionName::new(1, 22, 1));
        assert_eq!(
            registry.get(ProtocolVersion(800)),
            Some(VersionName::new(1, 22, 1))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_entries_snapshot_is_ordered() {
        let registry = VersionRegistry::new();
        registry.register(ProtocolVersion(810), VersionName::new(1, 23, 0));
        registry.register(ProtocolVersion(800), VersionName::new(1, 22, 0));
        let entries = registry.entries();
        assert_eq!(entries[0].0, ProtocolVersion(800));
        assert_eq!(entries[1].0, ProtocolVersion(810));
    }
}
