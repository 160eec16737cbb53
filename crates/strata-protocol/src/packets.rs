use bytes::Bytes;
use strata_types::{BlockPos, ChunkPos, Vec3};

use crate::dimension::DimensionCodec;
use crate::metadata::MetadataEntry;

/// Version-independent decoded packet representation.
/// The codec layer turns wire bytes into these; the translation engine only
/// ever rewrites decoded packets and never touches raw frames.
#[derive(Debug, Clone, PartialEq)]
pub enum BedrockPacket {
    // === Actor introduction (clientbound) ===
    /// Spawns another player entity on the client.
    /// `uuid` keeps whatever textual form the codec produced; revisions
    /// disagree on separator formatting and the translation layer normalizes
    /// it for the destination.
    AddPlayer {
        uuid: String,
        username: String,
        runtime_id: u64,
        unique_id: i64,
        position: Vec3,
        pitch: f32,
        yaw: f32,
        head_yaw: f32,
        held_item_id: i32,
        device_id: Option<String>,
        build_platform: Option<i32>,
    },
    /// Spawns a non-player entity on the client.
    AddEntity {
        unique_id: i64,
        runtime_id: u64,
        entity_type: String,
        position: Vec3,
        velocity: Vec3,
        pitch: f32,
        yaw: f32,
        head_yaw: f32,
        body_yaw: Option<f32>,
    },
    /// Entity metadata update, entries keyed by numeric field id.
    SetEntityData {
        runtime_id: u64,
        metadata: Vec<MetadataEntry>,
        tick: u64,
    },

    // === Session bootstrap (clientbound) ===
    /// World join bootstrap. Several fields only exist from a certain
    /// revision on; those are optional here and gated during translation.
    StartGame {
        runtime_id: u64,
        player_game_mode: i32,
        position: Vec3,
        pitch: f32,
        yaw: f32,
        world_name: Option<String>,
        spawn_position: BlockPos,
        dimension_codec: Option<DimensionCodec>,
        server_auth_sound: Option<bool>,
        hardcore: Option<bool>,
        world_template_id: Option<String>,
    },

    // === Terrain (clientbound) ===
    LevelChunk {
        position: ChunkPos,
        dimension: i32,
        sub_chunk_count: u32,
        cache_enabled: bool,
        /// Block identifiers referenced by the serialized sub-chunk payload.
        block_palette: Vec<String>,
        payload: Bytes,
    },

    // === Movement (both directions) ===
    MovePlayer {
        runtime_id: u64,
        position: Vec3,
        pitch: f32,
        yaw: f32,
        head_yaw: f32,
        mode: u8,
        on_ground: bool,
        ridden_runtime_id: u64,
        tick: u64,
    },

    // === Inventory (serverbound) ===
    InventoryTransaction {
        legacy_request_id: i32,
        transaction_type: u32,
        actions: Option<Vec<InventoryAction>>,
        has_item_stack_ids: bool,
    },

    // === Misc ===
    CraftingData {
        cleared: bool,
        recipe_count: u32,
    },
    Text {
        message_type: u8,
        needs_translation: bool,
        source: Option<String>,
        message: String,
    },
    /// A packet the decoder did not recognize. Raw bytes are preserved so it
    /// can be forwarded verbatim.
    Unknown {
        packet_id: u32,
        payload: Bytes,
    },
}

impl BedrockPacket {
    /// Classify this packet, or `None` when it cannot be classified.
    pub fn kind(&self) -> Option<PacketKind> {
        match self {
            BedrockPacket::AddPlayer { .. } => Some(PacketKind::AddPlayer),
            BedrockPacket::AddEntity { .. } => Some(PacketKind::AddEntity),
            BedrockPacket::SetEntityData { .. } => Some(PacketKind::SetEntityData),
            BedrockPacket::StartGame { .. } => Some(PacketKind::StartGame),
            BedrockPacket::LevelChunk { .. } => Some(PacketKind::LevelChunk),
            BedrockPacket::MovePlayer { .. } => Some(PacketKind::MovePlayer),
            BedrockPacket::InventoryTransaction { .. } => Some(PacketKind::InventoryTransaction),
            BedrockPacket::CraftingData { .. } => Some(PacketKind::CraftingData),
            BedrockPacket::Text { .. } => Some(PacketKind::Text),
            BedrockPacket::Unknown { .. } => None,
        }
    }
}

/// The packet categories the translation layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PacketKind {
    AddEntity,
    AddPlayer,
    CraftingData,
    InventoryTransaction,
    LevelChunk,
    MovePlayer,
    SetEntityData,
    StartGame,
    Text,
}

impl PacketKind {
    pub const ALL: [PacketKind; 9] = [
        PacketKind::AddEntity,
        PacketKind::AddPlayer,
        PacketKind::CraftingData,
        PacketKind::InventoryTransaction,
        PacketKind::LevelChunk,
        PacketKind::MovePlayer,
        PacketKind::SetEntityData,
        PacketKind::StartGame,
        PacketKind::Text,
    ];

    /// Stable snake_case name, used in registration APIs and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            PacketKind::AddEntity => "add_entity",
            PacketKind::AddPlayer => "add_player",
            PacketKind::CraftingData => "crafting_data",
            PacketKind::InventoryTransaction => "inventory_transaction",
            PacketKind::LevelChunk => "level_chunk",
            PacketKind::MovePlayer => "move_player",
            PacketKind::SetEntityData => "set_entity_data",
            PacketKind::StartGame => "start_game",
            PacketKind::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PacketKind::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl std::fmt::Display for PacketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One slot change inside an inventory transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryAction {
    pub source_type: u32,
    pub window_id: i32,
    pub slot: u32,
    pub count_delta: i32,
}

impl InventoryAction {
    pub fn new(source_type: u32, window_id: i32, slot: u32, count_delta: i32) -> Self {
        Self {
            source_type,
            window_id,
            slot,
            count_delta,
        }
    }
}

/// Inventory action source types.
pub mod action_source {
    pub const CONTAINER: u32 = 0;
    pub const GLOBAL: u32 = 1;
    pub const WORLD_INTERACTION: u32 = 2;
    pub const CREATIVE: u32 = 3;
    pub const CRAFTER_OUTPUT: u32 = 100;
    pub const CLIENT_PREDICTION: u32 = 99999;
}

/// Move player mode values.
pub mod move_mode {
    pub const NORMAL: u8 = 0;
    pub const RESET: u8 = 1;
    pub const TELEPORT: u8 = 2;
    pub const HEAD_ROTATION: u8 = 3;
    pub const SERVER_INTERPOLATION: u8 = 4;
}
