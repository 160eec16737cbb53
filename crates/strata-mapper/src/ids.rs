use crate::changes::{V1_21_10, V1_21_20, V1_21_30};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use strata_protocol::PacketKind;
use strata_types::VersionName;

/// Built-in wire identifiers per breakpoint release. The first three kinds
/// changed ids across the series; the rest kept one id throughout it.
/// Releases between breakpoints are not listed, so exact lookups for them
/// come back empty.
const SEED_IDS: [(PacketKind, [(VersionName, u32); 3]); 9] = [
    (
        PacketKind::AddEntity,
        [(V1_21_10, 0x0f), (V1_21_20, 0x0f), (V1_21_30, 0x10)],
    ),
    (
        PacketKind::SetEntityData,
        [(V1_21_10, 0x27), (V1_21_20, 0x27), (V1_21_30, 0x28)],
    ),
    (
        PacketKind::AddPlayer,
        [(V1_21_10, 0x02), (V1_21_20, 0x02), (V1_21_30, 0x03)],
    ),
    (
        PacketKind::Text,
        [(V1_21_10, 0x09), (V1_21_20, 0x09), (V1_21_30, 0x09)],
    ),
    (
        PacketKind::StartGame,
        [(V1_21_10, 0x0b), (V1_21_20, 0x0b), (V1_21_30, 0x0b)],
    ),
    (
        PacketKind::MovePlayer,
        [(V1_21_10, 0x13), (V1_21_20, 0x13), (V1_21_30, 0x13)],
    ),
    (
        PacketKind::InventoryTransaction,
        [(V1_21_10, 0x1e), (V1_21_20, 0x1e), (V1_21_30, 0x1e)],
    ),
    (
        PacketKind::CraftingData,
        [(V1_21_10, 0x34), (V1_21_20, 0x34), (V1_21_30, 0x34)],
    ),
    (
        PacketKind::LevelChunk,
        [(V1_21_10, 0x3a), (V1_21_20, 0x3a), (V1_21_30, 0x3a)],
    ),
];

/// Per-release wire identifiers for each packet kind.
///
/// Lookups are exact: a (kind, release) pair that was never registered
/// yields `None` even when a neighboring release is present.
#[derive(Debug, Default)]
pub struct PacketIdTable {
    ids: RwLock<HashMap<PacketKind, BTreeMap<VersionName, u32>>>,
}

impl PacketIdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with the built-in identifier data.
    pub fn builtin() -> Self {
        let table = Self::new();
        for (kind, entries) in SEED_IDS {
            for (version, id) in entries {
                table.register(kind, version, id);
            }
        }
        table
    }

    /// Register a wire identifier. Re-registering a pair overwrites it
    /// silently; the last writer wins.
    pub fn register(&self, kind: PacketKind, version: VersionName, id: u32) {
        let mut ids = self.ids.write().unwrap();
        ids.entry(kind).or_default().insert(version, id);
    }

    pub fn get(&self, kind: PacketKind, version: &VersionName) -> Option<u32> {
        let ids = self.ids.read().unwrap();
        ids.get(&kind).and_then(|per_version| per_version.get(version)).copied()
    }

    /// Kinds with at least one registered identifier, in stable order.
    pub fn kinds(&self) -> Vec<PacketKind> {
        let ids = self.ids.read().unwrap();
        let mut kinds: Vec<_> = ids.keys().copied().collect();
        kinds.sort();
        kinds
    }
}
