use std::collections::BTreeMap;
use strata_protocol::PacketKind;
use strata_types::VersionName;

const V1_21_10: VersionName = VersionName::new(1, 21, 10);
const V1_21_20: VersionName = VersionName::new(1, 21, 20);
const V1_21_30: VersionName = VersionName::new(1, 21, 30);

/// Capabilities available from a given release onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionFeatures {
    /// Whether clients on this release may join at all.
    pub supported: bool,
    pub crafter_block: bool,
    /// Entity identifiers this release knows that the series baseline
    /// did not.
    pub new_entities: &'static [&'static str],
    /// Packet kinds whose shape differs from the previous breakpoint.
    pub packet_changes: &'static [PacketKind],
}

impl VersionFeatures {
    pub fn knows_entity(&self, entity_type: &str) -> bool {
        self.new_entities.contains(&entity_type)
    }
}

/// Breakpoints in ascending release order. Entries are cumulative: each
/// repeats what still holds from the one before it.
const BREAKPOINTS: [(VersionName, VersionFeatures); 3] = [
    (
        V1_21_10,
        VersionFeatures {
            supported: true,
            crafter_block: false,
            new_entities: &["minecraft:breeze", "minecraft:armadillo"],
            packet_changes: &[PacketKind::AddPlayer, PacketKind::SetEntityData],
        },
    ),
    (
        V1_21_20,
        VersionFeatures {
            supported: true,
            crafter_block: true,
            new_entities: &["minecraft:breeze", "minecraft:armadillo", "minecraft:bogged"],
            packet_changes: &[
                PacketKind::AddPlayer,
                PacketKind::SetEntityData,
                PacketKind::InventoryTransaction,
            ],
        },
    ),
    (
        V1_21_30,
        VersionFeatures {
            supported: true,
            crafter_block: true,
            new_entities: &[
                "minecraft:breeze",
                "minecraft:armadillo",
                "minecraft:bogged",
                "minecraft:wind_charge",
            ],
            packet_changes: &[
                PacketKind::AddPlayer,
                PacketKind::SetEntityData,
                PacketKind::InventoryTransaction,
                PacketKind::CraftingData,
            ],
        },
    ),
];

/// Floor-semantics lookup over the feature breakpoints: a release between
/// two breakpoints behaves like the lower one, and anything below the first
/// breakpoint behaves like the baseline.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    entries: BTreeMap<VersionName, VersionFeatures>,
    baseline: VersionFeatures,
}

impl FeatureMatrix {
    /// The built-in 1.21.x breakpoint data.
    pub fn builtin() -> Self {
        Self {
            entries: BREAKPOINTS.iter().copied().collect(),
            baseline: BREAKPOINTS[0].1,
        }
    }

    /// Features at `version`: the greatest breakpoint at or below it.
    pub fn floor(&self, version: &VersionName) -> &VersionFeatures {
        self.entries
            .range(..=*version)
            .next_back()
            .map(|(_, features)| features)
            .unwrap_or(&self.baseline)
    }
}

impl Default for FeatureMatrix {
    fn default() -> Self {
        Self::builtin()
    }
}
