use strata_mapper::changes;
use strata_protocol::{BedrockPacket, DimensionCodec, PacketKind};
use strata_types::VersionName;
use strata_versions::VersionTable;
use tracing::debug;

/// Injected when a bootstrap packet arrives without a world name.
const DEFAULT_WORLD_NAME: &str = "Bedrock level";

/// Generic per-category handlers, consulted when no exact-pair rule is
/// registered. Every handler preserves the packet's kind; they adjust
/// fields, never reclassify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerCategory {
    ActorIntro,
    EntityMetadata,
    SessionBootstrap,
    Terrain,
    Movement,
    Inventory,
}

impl HandlerCategory {
    /// Handler responsible for a packet kind. Kinds without one (chat,
    /// recipe lists) pass through untouched.
    pub fn for_kind(kind: PacketKind) -> Option<Self> {
        match kind {
            PacketKind::AddPlayer | PacketKind::AddEntity => Some(HandlerCategory::ActorIntro),
            PacketKind::SetEntityData => Some(HandlerCategory::EntityMetadata),
            PacketKind::StartGame => Some(HandlerCategory::SessionBootstrap),
            PacketKind::LevelChunk => Some(HandlerCategory::Terrain),
            PacketKind::MovePlayer => Some(HandlerCategory::Movement),
            PacketKind::InventoryTransaction => Some(HandlerCategory::Inventory),
            PacketKind::CraftingData | PacketKind::Text => None,
        }
    }
}

/// Run one category handler over a packet.
pub fn apply(
    category: HandlerCategory,
    packet: BedrockPacket,
    from: &VersionName,
    to: &VersionName,
    table: &VersionTable,
) -> BedrockPacket {
    match category {
        HandlerCategory::ActorIntro => translate_actor_intro(packet, from, to, table),
        HandlerCategory::EntityMetadata => translate_entity_metadata(packet, to),
        HandlerCategory::SessionBootstrap => translate_session_bootstrap(packet, to),
        HandlerCategory::Terrain => translate_terrain(packet, to),
        HandlerCategory::Movement => translate_movement(packet, to),
        HandlerCategory::Inventory => translate_inventory(packet, to),
    }
}

/// Actor introductions: identifier text takes the target's form and runtime
/// ids are clamped to the target's legal range. Masking is idempotent, so
/// an id already in range survives unchanged.
fn translate_actor_intro(
    mut packet: BedrockPacket,
    from: &VersionName,
    to: &VersionName,
    table: &VersionTable,
) -> BedrockPacket {
    let mask = changes::runtime_id_mask(to);
    match &mut packet {
        BedrockPacket::AddPlayer {
            uuid, runtime_id, ..
        } => {
            *uuid = changes::reformat_uuid(uuid, to);
            *runtime_id &= mask;
        }
        BedrockPacket::AddEntity {
            runtime_id,
            entity_type,
            ..
        } => {
            *runtime_id &= mask;
            if table.features(from).knows_entity(entity_type)
                && !table.features(to).knows_entity(entity_type)
            {
                debug!("entity type {entity_type} is newer than {to}; client will show a fallback");
            }
        }
        _ => {}
    }
    packet
}

/// Entity metadata: entries for fields the target release has never heard
/// of are dropped. Everything else is forwarded as-is.
fn translate_entity_metadata(mut packet: BedrockPacket, to: &VersionName) -> BedrockPacket {
    if let BedrockPacket::SetEntityData { metadata, .. } = &mut packet {
        let before = metadata.len();
        metadata.retain(|entry| !changes::metadata_field_unknown(entry.id, to));
        if metadata.len() < before {
            debug!("dropped {} metadata entries unknown at {to}", before - metadata.len());
        }
    }
    packet
}

/// Session bootstrap: mandatory fields get defaults when the source left
/// them out, fields newer than the target are stripped, and the world
/// document is reshaped for the target.
fn translate_session_bootstrap(mut packet: BedrockPacket, to: &VersionName) -> BedrockPacket {
    if let BedrockPacket::StartGame {
        world_name,
        dimension_codec,
        server_auth_sound,
        hardcore,
        world_template_id,
        ..
    } = &mut packet
    {
        if world_name.is_none() {
            *world_name = Some(DEFAULT_WORLD_NAME.to_string());
        }
        *server_auth_sound = if *to >= changes::SERVER_AUTH_SOUND_SINCE {
            Some(server_auth_sound.unwrap_or(false))
        } else {
            None
        };
        *hardcore = if *to >= changes::HARDCORE_SINCE {
            Some(hardcore.unwrap_or(false))
        } else {
            None
        };
        if *to < changes::WORLD_TEMPLATE_ID_SINCE {
            *world_template_id = None;
        }
        let codec = dimension_codec.take().unwrap_or_else(DimensionCodec::minimal);
        *dimension_codec = Some(if *to < changes::STRUCTURED_CODEC_SINCE {
            codec.down_converted()
        } else {
            codec.sanitized()
        });
    }
    packet
}

/// Terrain: palette identifiers the target does not know are swapped for
/// air so the client never sees an unresolvable block. The serialized
/// payload is forwarded verbatim; re-encoding it against the remapped
/// palette is the codec layer's job, not ours.
fn translate_terrain(mut packet: BedrockPacket, to: &VersionName) -> BedrockPacket {
    if let BedrockPacket::LevelChunk {
        position,
        block_palette,
        ..
    } = &mut packet
    {
        let mut remapped = 0usize;
        for entry in block_palette.iter_mut() {
            if changes::block_unknown(entry, to) {
                *entry = changes::FALLBACK_BLOCK.to_string();
                remapped += 1;
            }
        }
        if remapped > 0 {
            debug!(
                "chunk ({}, {}): {remapped} palette entries unknown at {to}, remapped to {}",
                position.x,
                position.z,
                changes::FALLBACK_BLOCK
            );
        }
    }
    packet
}

/// Movement: non-finite floats are zeroed rather than forwarded, and mode
/// values above the target's ceiling are clamped to it.
fn translate_movement(mut packet: BedrockPacket, to: &VersionName) -> BedrockPacket {
    if let BedrockPacket::MovePlayer {
        position,
        pitch,
        yaw,
        head_yaw,
        mode,
        ..
    } = &mut packet
    {
        position.x = finite_or_zero(position.x);
        position.y = finite_or_zero(position.y);
        position.z = finite_or_zero(position.z);
        *pitch = finite_or_zero(*pitch);
        *yaw = finite_or_zero(*yaw);
        *head_yaw = finite_or_zero(*head_yaw);
        let ceiling = changes::max_move_mode(to);
        if *mode > ceiling {
            debug!("move mode {mode} unknown at {to}, clamped to {ceiling}");
            *mode = ceiling;
        }
    }
    packet
}

/// Inventory transactions: the action list is required downstream, so an
/// absent one becomes empty, and actions with source types the target
/// predates are dropped.
fn translate_inventory(mut packet: BedrockPacket, to: &VersionName) -> BedrockPacket {
    if let BedrockPacket::InventoryTransaction { actions, .. } = &mut packet {
        let list = actions.get_or_insert_with(Vec::new);
        let before = list.len();
        list.retain(|action| !changes::action_source_unknown(action.source_type, to));
        if list.len() < before {
            debug!(
                "dropped {} inventory actions with source types unknown at {to}",
                before - list.len()
            );
        }
    }
    packet
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
