use crate::changes::{self, V1_21_10, V1_21_20, V1_21_30};
use crate::ids::PacketIdTable;
use crate::rules::{ConversionFn, RuleKey, RuleSet};
use std::sync::Arc;
use strata_protocol::{BedrockPacket, PacketKind};
use strata_types::VersionName;

/// Wire-identifier table plus the directed conversion rules between
/// releases, for packet kinds whose shape changed.
pub struct PacketMapper {
    ids: PacketIdTable,
    rules: RuleSet,
}

impl PacketMapper {
    /// Empty mapper: no identifiers, no rules.
    pub fn new() -> Self {
        Self {
            ids: PacketIdTable::new(),
            rules: RuleSet::new(),
        }
    }

    /// Mapper seeded with the built-in identifier table and stock rules.
    pub fn builtin() -> Self {
        let mapper = Self {
            ids: PacketIdTable::builtin(),
            rules: RuleSet::new(),
        };
        // add_player 1.21.10 -> 1.21.30: the identifier text switches forms.
        mapper.register_rule(PacketKind::AddPlayer, V1_21_10, V1_21_30, |mut packet| {
            if let BedrockPacket::AddPlayer { uuid, .. } = &mut packet {
                *uuid = changes::reformat_uuid(uuid, &V1_21_30);
            }
            packet
        });
        // set_entity_data 1.21.20 -> 1.21.10: later metadata fields vanish.
        mapper.register_rule(
            PacketKind::SetEntityData,
            V1_21_20,
            V1_21_10,
            |mut packet| {
                if let BedrockPacket::SetEntityData { metadata, .. } = &mut packet {
                    metadata.retain(|entry| !changes::metadata_field_unknown(entry.id, &V1_21_10));
                }
                packet
            },
        );
        mapper
    }

    /// Wire identifier for a kind at an exact release.
    pub fn packet_id(&self, kind: PacketKind, version: &VersionName) -> Option<u32> {
        self.ids.get(kind, version)
    }

    /// Register (or overwrite) a wire identifier.
    pub fn register_id(&self, kind: PacketKind, version: VersionName, id: u32) {
        self.ids.register(kind, version, id);
    }

    /// Kinds with at least one registered identifier.
    pub fn supported_packets(&self) -> Vec<PacketKind> {
        self.ids.kinds()
    }

    /// Register a directed conversion rule for one exact (kind, from, to)
    /// combination. A duplicate registration overwrites silently.
    pub fn register_rule(
        &self,
        kind: PacketKind,
        from: VersionName,
        to: VersionName,
        rule: impl Fn(BedrockPacket) -> BedrockPacket + Send + Sync + 'static,
    ) {
        self.rules.insert(RuleKey::new(kind, from, to), Arc::new(rule));
    }

    /// The rule registered under `key`, if any.
    pub fn rule_for(&self, key: &RuleKey) -> Option<Arc<ConversionFn>> {
        self.rules.get(key)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Apply the exact-pair rule for this packet's kind.
    ///
    /// `None` means the packet could not be classified and the caller must
    /// decide what to do with it. A recognized packet with no rule for the
    /// pair comes back unchanged.
    pub fn convert_packet(
        &self,
        packet: BedrockPacket,
        from: &VersionName,
        to: &VersionName,
    ) -> Option<BedrockPacket> {
        let kind = packet.kind()?;
        match self.rule_for(&RuleKey::new(kind, *from, *to)) {
            Some(rule) => Some((*rule)(packet)),
            None => Some(packet),
        }
    }
}

impl Default for PacketMapper {
    fn default() -> Self {
        Self::builtin()
    }
}
