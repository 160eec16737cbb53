use crate::features::{FeatureMatrix, VersionFeatures};
use crate::registry::VersionRegistry;
use std::collections::BTreeMap;
use strata_types::{ProtocolVersion, VersionName};
use thiserror::Error;

/// The 1.21.x series, protocol identifier to release name.
const PROTOCOL_TABLE: [(u32, VersionName); 27] = [
    (675, VersionName::new(1, 21, 0)),
    (676, VersionName::new(1, 21, 1)),
    (677, VersionName::new(1, 21, 2)),
    (678, VersionName::new(1, 21, 3)),
    (679, VersionName::new(1, 21, 4)),
    (680, VersionName::new(1, 21, 5)),
    (681, VersionName::new(1, 21, 6)),
    (682, VersionName::new(1, 21, 7)),
    (683, VersionName::new(1, 21, 8)),
    (684, VersionName::new(1, 21, 9)),
    (685, VersionName::new(1, 21, 10)),
    (686, VersionName::new(1, 21, 11)),
    (687, VersionName::new(1, 21, 12)),
    (688, VersionName::new(1, 21, 13)),
    (689, VersionName::new(1, 21, 14)),
    (690, VersionName::new(1, 21, 15)),
    (691, VersionName::new(1, 21, 20)),
    (692, VersionName::new(1, 21, 21)),
    (693, VersionName::new(1, 21, 22)),
    (694, VersionName::new(1, 21, 23)),
    (695, VersionName::new(1, 21, 24)),
    (696, VersionName::new(1, 21, 25)),
    (697, VersionName::new(1, 21, 26)),
    (698, VersionName::new(1, 21, 27)),
    (699, VersionName::new(1, 21, 28)),
    (700, VersionName::new(1, 21, 29)),
    (701, VersionName::new(1, 21, 30)),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    /// The supported set is empty, so no protocol range exists.
    #[error("no supported protocol versions")]
    EmptyRange,
}

/// Protocol-identifier ↔ release-name mapping plus the per-release feature
/// matrix.
///
/// Lookups consult the runtime registry first, then the built-in entries,
/// so custom registrations shadow the shipped table.
pub struct VersionTable {
    protocols: BTreeMap<ProtocolVersion, VersionName>,
    features: FeatureMatrix,
    registry: VersionRegistry,
}

impl VersionTable {
    /// Table over the built-in 1.21.x series, adopting `registry` as its
    /// runtime overlay.
    pub fn builtin(registry: VersionRegistry) -> Self {
        Self::with_entries(
            PROTOCOL_TABLE
                .iter()
                .map(|(p, v)| (ProtocolVersion(*p), *v)),
            registry,
        )
    }

    /// Table over caller-supplied entries, for hosts that carry their own
    /// protocol data.
    pub fn with_entries(
        entries: impl IntoIterator<Item = (ProtocolVersion, VersionName)>,
        registry: VersionRegistry,
    ) -> Self {
        Self {
            protocols: entries.into_iter().collect(),
            features: FeatureMatrix::builtin(),
            registry,
        }
    }

    /// True when the protocol identifier maps to a release the table marks
    /// supported. Unknown identifiers are unsupported, never an error.
    pub fn is_protocol_supported(&self, protocol: ProtocolVersion) -> bool {
        match self.version_name(protocol) {
            Some(version) => self.is_version_supported(&version),
            None => false,
        }
    }

    pub fn is_version_supported(&self, version: &VersionName) -> bool {
        self.features(version).supported
    }

    /// Release name for a protocol identifier, registry entries first.
    pub fn version_name(&self, protocol: ProtocolVersion) -> Option<VersionName> {
        self.registry
            .get(protocol)
            .or_else(|| self.protocols.get(&protocol).copied())
    }

    /// Display label that never fails; unknown identifiers come back as
    /// `unknown (protocol N)`. Meant for log lines and kick messages.
    pub fn version_name_safe(&self, protocol: ProtocolVersion) -> String {
        match self.version_name(protocol) {
            Some(version) => version.to_string(),
            None => format!("unknown (protocol {protocol})"),
        }
    }

    /// Protocol identifier for a release name. When several identifiers map
    /// to the same name the lowest wins, so the answer is deterministic.
    pub fn protocol_for(&self, version: &VersionName) -> Option<ProtocolVersion> {
        self.merged()
            .into_iter()
            .find(|(_, name)| name == version)
            .map(|(protocol, _)| protocol)
    }

    /// Features in effect at `version` (floor semantics over the breakpoint
    /// matrix; names below the first breakpoint get the baseline).
    pub fn features(&self, version: &VersionName) -> VersionFeatures {
        *self.features.floor(version)
    }

    /// All entries whose release is marked supported, in ascending protocol
    /// order.
    pub fn supported_versions(&self) -> BTreeMap<ProtocolVersion, VersionName> {
        self.merged()
            .into_iter()
            .filter(|(_, version)| self.is_version_supported(version))
            .collect()
    }

    /// Smallest and largest supported protocol identifiers.
    pub fn protocol_range(&self) -> Result<(ProtocolVersion, ProtocolVersion), VersionError> {
        let supported = self.supported_versions();
        let min = supported.keys().next().copied();
        let max = supported.keys().next_back().copied();
        match (min, max) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(VersionError::EmptyRange),
        }
    }

    /// Register a custom protocol → release entry in the runtime overlay.
    pub fn add_custom(&self, protocol: ProtocolVersion, name: VersionName) {
        self.registry.register(protocol, name);
    }

    /// Built-in entries with the registry overlay applied on top.
    fn merged(&self) -> BTreeMap<ProtocolVersion, VersionName> {
        let mut all = self.protocols.clone();
        for (protocol, version) in self.registry.entries() {
            all.insert(protocol, version);
        }
        all
    }
}

impl Default for VersionTable {
    fn default() -> Self {
        Self::builtin(VersionRegistry::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_protocol_resolves_and_is_supported() {
        let table = VersionTable::default();
        assert_eq!(
            table.version_name(ProtocolVersion(685)),
            Some(VersionName::new(1, 21, 10))
        );
        assert!(table.is_protocol_supported(ProtocolVersion(685)));
        let version = table.version_name(ProtocolVersion(686)).unwrap();
        assert_eq!(version, VersionName::new(1, 21, 11));
        assert!(table.is_protocol_supported(ProtocolVersion(686)));
        // 1.21.11 sits between breakpoints and behaves like 1.21.10.
        assert_eq!(
            table.features(&version),
            table.features(&VersionName::new(1, 21, 10))
        );
    }

    #[test]
    fn test_unknown_protocol_is_reported_not_thrown() {
        let table = VersionTable::default();
        assert_eq!(table.version_name(ProtocolVersion(9999)), None);
        assert!(!table.is_protocol_supported(ProtocolVersion(9999)));
        let label = table.version_name_safe(ProtocolVersion(9999));
        assert!(label.contains("9999"));
        assert!(label.contains("unknown"));
    }

    #[test]
    fn test_protocol_range_spans_the_series() {
        let table = VersionTable::default();
        let (min, max) = table.protocol_range().unwrap();
        assert_eq!(min, ProtocolVersion(675));
        assert_eq!(max, ProtocolVersion(701));
    }

    #[test]
    fn test_protocol_range_of_empty_table_errors() {
        let table = VersionTable::with_entries([], VersionRegistry::new());
        assert_eq!(table.protocol_range(), Err(VersionError::EmptyRange));
    }

    #[test]
    fn test_every_supported_entry_round_trips() {
        let table = VersionTable::default();
        let (min, max) = table.protocol_range().unwrap();
        for (protocol, version) in table.supported_versions() {
            assert!(table.is_protocol_supported(protocol));
            assert_eq!(table.version_name(protocol), Some(version));
            assert!(protocol >= min && protocol <= max);
        }
    }

    #[test]
    fn test_protocol_for_prefers_lowest_identifier() {
        let table = VersionTable::default();
        assert_eq!(
            table.protocol_for(&VersionName::new(1, 21, 30)),
            Some(ProtocolVersion(701))
        );
        // A duplicate name registered under a higher identifier must not
        // steal the answer.
        table.add_custom(ProtocolVersion(9000), VersionName::new(1, 21, 30));
        assert_eq!(
            table.protocol_for(&VersionName::new(1, 21, 30)),
            Some(ProtocolVersion(701))
        );
        assert_eq!(table.protocol_for(&VersionName::new(2, 0, 0)), None);
    }

    #[test]
    fn test_registry_overlay_shadows_builtin() {
        let table = VersionTable::default();
        table.add_custom(ProtocolVersion(700), VersionName::new(9, 9, 9));
        assert_eq!(
            table.version_name(ProtocolVersion(700)),
            Some(VersionName::new(9, 9, 9))
        );
    }

    #[test]
    fn test_custom_protocol_joins_supported_set() {
        let table = VersionTable::default();
        table.add_custom(ProtocolVersion(9001), VersionName::new(1, 21, 25));
        assert!(table.is_protocol_supported(ProtocolVersion(9001)));
        assert!(table
            .supported_versions()
            .contains_key(&ProtocolVersion(9001)));
    }

    #[test]
    fn test_supported_versions_is_ascending() {
        let table = VersionTable::default();
        let keys: Vec<_> = table.supported_versions().into_keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 27);
    }
}
