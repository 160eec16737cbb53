use strata_protocol::{action_source, move_mode};
use strata_types::VersionName;
use uuid::Uuid;

pub(crate) const V1_21_10: VersionName = VersionName::new(1, 21, 10);
pub(crate) const V1_21_20: VersionName = VersionName::new(1, 21, 20);
pub(crate) const V1_21_30: VersionName = VersionName::new(1, 21, 30);

/// Entity metadata field ids by the release that introduced them.
pub const METADATA_INTRODUCED: [(u32, VersionName); 4] = [
    (100, V1_21_20),
    (101, V1_21_20),
    (102, V1_21_30),
    (103, V1_21_30),
];

/// True when `field_id` does not exist yet at `version`.
pub fn metadata_field_unknown(field_id: u32, version: &VersionName) -> bool {
    METADATA_INTRODUCED
        .iter()
        .any(|(id, since)| *id == field_id && version < since)
}

/// Block identifiers by the release that introduced them. Palettes sent to
/// older targets swap these for [`FALLBACK_BLOCK`].
pub const BLOCK_INTRODUCED: [(&str, VersionName); 3] = [
    ("minecraft:crafter", V1_21_20),
    ("minecraft:trial_spawner", V1_21_20),
    ("minecraft:vault", V1_21_30),
];

pub const FALLBACK_BLOCK: &str = "minecraft:air";

/// True when the block identifier does not exist yet at `version`.
pub fn block_unknown(id: &str, version: &VersionName) -> bool {
    BLOCK_INTRODUCED
        .iter()
        .any(|(block, since)| *block == id && version < since)
}

/// Inventory action source types by the release that introduced them.
pub const ACTION_SOURCE_INTRODUCED: [(u32, VersionName); 1] =
    [(action_source::CRAFTER_OUTPUT, V1_21_20)];

/// True when the action source type does not exist yet at `version`.
pub fn action_source_unknown(source_type: u32, version: &VersionName) -> bool {
    ACTION_SOURCE_INTRODUCED
        .iter()
        .any(|(source, since)| *source == source_type && version < since)
}

/// Runtime entity id mask for a release. Ids stayed 31-bit until 1.21.30
/// widened them; masking twice is a no-op either way.
pub fn runtime_id_mask(version: &VersionName) -> u64 {
    if *version >= V1_21_30 {
        0x7FFF_FFFF_FFFF_FFFF
    } else {
        0x7FFF_FFFF
    }
}

/// Highest move-player mode value a release accepts.
pub fn max_move_mode(version: &VersionName) -> u8 {
    if *version >= V1_21_20 {
        move_mode::SERVER_INTERPOLATION
    } else {
        move_mode::HEAD_ROTATION
    }
}

/// Releases from 1.21.20 on carry player identifiers hyphenated; older ones
/// pack the 32 hex digits bare.
pub fn uses_hyphenated_uuid(version: &VersionName) -> bool {
    *version >= V1_21_20
}

/// Rewrite a textual 128-bit identifier into the form `to` expects. Text
/// that does not parse as such an identifier passes through untouched.
pub fn reformat_uuid(raw: &str, to: &VersionName) -> String {
    match Uuid::parse_str(raw) {
        Ok(parsed) if uses_hyphenated_uuid(to) => parsed.hyphenated().to_string(),
        Ok(parsed) => parsed.simple().to_string(),
        Err(_) => raw.to_string(),
    }
}

// Session bootstrap fields gated by release.
pub const SERVER_AUTH_SOUND_SINCE: VersionName = V1_21_20;
pub const HARDCORE_SINCE: VersionName = V1_21_30;
pub const WORLD_TEMPLATE_ID_SINCE: VersionName = V1_21_30;
/// Before this release the world document is the reduced overworld-only form.
pub const STRUCTURED_CODEC_SINCE: VersionName = V1_21_20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_fields_gate_on_target() {
        assert!(metadata_field_unknown(100, &V1_21_10));
        assert!(metadata_field_unknown(101, &V1_21_10));
        assert!(!metadata_field_unknown(100, &V1_21_20));
        assert!(metadata_field_unknown(102, &V1_21_20));
        assert!(!metadata_field_unknown(103, &V1_21_30));
        // Fields outside the change table exist everywhere.
        assert!(!metadata_field_unknown(4, &V1_21_10));
    }

    #[test]
    fn test_uuid_reformat_per_target() {
        let hyphenated = "123e4567-e89b-12d3-a456-426614174000";
        let bare = "123e4567e89b12d3a456426614174000";
        assert_eq!(reformat_uuid(bare, &V1_21_30), hyphenated);
        assert_eq!(reformat_uuid(hyphenated, &V1_21_30), hyphenated);
        assert_eq!(reformat_uuid(hyphenated, &V1_21_10), bare);
        assert_eq!(reformat_uuid(bare, &V1_21_10), bare);
    }

    #[test]
    fn test_uuid_reformat_leaves_garbage_alone() {
        assert_eq!(reformat_uuid("not-a-uuid", &V1_21_30), "not-a-uuid");
        assert_eq!(reformat_uuid("", &V1_21_10), "");
    }

    #[test]
    fn test_runtime_id_mask_widens_at_1_21_30() {
        assert_eq!(runtime_id_mask(&V1_21_10), 0x7FFF_FFFF);
        assert_eq!(runtime_id_mask(&V1_21_20), 0x7FFF_FFFF);
        assert_eq!(runtime_id_mask(&V1_21_30), 0x7FFF_FFFF_FFFF_FFFF);
        assert_eq!(
            runtime_id_mask(&VersionName::new(1, 22, 0)),
            0x7FFF_FFFF_FFFF_FFFF
        );
    }

    #[test]
    fn test_move_mode_ceiling() {
        assert_eq!(max_move_mode(&V1_21_10), move_mode::HEAD_ROTATION);
        assert_eq!(max_move_mode(&V1_21_20), move_mode::SERVER_INTERPOLATION);
    }

    #[test]
    fn test_block_gate_on_target() {
        assert!(block_unknown("minecraft:crafter", &V1_21_10));
        assert!(!block_unknown("minecraft:crafter", &V1_21_20));
        assert!(block_unknown("minecraft:vault", &V1_21_20));
        assert!(!block_unknown("minecraft:stone", &V1_21_10));
    }
}
