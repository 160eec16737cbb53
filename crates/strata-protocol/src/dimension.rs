/// The overworld dimension identifier every client ships with.
pub const OVERWORLD: &str = "minecraft:overworld";

const OVERWORLD_MIN_Y: i32 = -64;
const OVERWORLD_HEIGHT: i32 = 384;
const GENERATOR_INFINITE: i32 = 1;

/// Structured world-configuration document carried inside the session
/// bootstrap packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionCodec {
    pub dimensions: Vec<DimensionDefinition>,
}

/// One dimension definition: identifier, vertical range, generator selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionDefinition {
    pub id: String,
    pub min_y: i32,
    pub height: i32,
    pub generator: i32,
}

impl DimensionDefinition {
    pub fn new(id: impl Into<String>, min_y: i32, height: i32, generator: i32) -> Self {
        Self {
            id: id.into(),
            min_y,
            height,
            generator,
        }
    }

    /// The overworld with its stock vertical range.
    pub fn overworld() -> Self {
        Self::new(OVERWORLD, OVERWORLD_MIN_Y, OVERWORLD_HEIGHT, GENERATOR_INFINITE)
    }

    fn has_valid_range(&self) -> bool {
        self.height > 0
    }
}

impl DimensionCodec {
    /// Smallest document every revision accepts: just the overworld.
    pub fn minimal() -> Self {
        Self {
            dimensions: vec![DimensionDefinition::overworld()],
        }
    }

    /// A codec is valid when it is non-empty, names the overworld, and every
    /// definition has a positive height.
    pub fn is_valid(&self) -> bool {
        !self.dimensions.is_empty()
            && self.dimensions.iter().any(|d| d.id == OVERWORLD)
            && self.dimensions.iter().all(|d| d.has_valid_range())
    }

    /// Repaired complete form: the overworld is injected when missing and
    /// broken vertical ranges are reset to the overworld defaults.
    pub fn sanitized(mut self) -> Self {
        for dim in &mut self.dimensions {
            if !dim.has_valid_range() {
                dim.min_y = OVERWORLD_MIN_Y;
                dim.height = OVERWORLD_HEIGHT;
            }
        }
        if !self.dimensions.iter().any(|d| d.id == OVERWORLD) {
            self.dimensions.insert(0, DimensionDefinition::overworld());
        }
        self
    }

    /// Reduced form for revisions that predate the structured document:
    /// only the overworld entry survives, repaired if needed.
    pub fn down_converted(self) -> Self {
        let overworld = self
            .dimensions
            .into_iter()
            .find(|d| d.id == OVERWORLD)
            .map(|mut d| {
                if !d.has_valid_range() {
                    d.min_y = OVERWORLD_MIN_Y;
                    d.height = OVERWORLD_HEIGHT;
                }
                d
            })
            .unwrap_or_else(DimensionDefinition::overworld);
        Self {
            dimensions: vec![overworld],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_is_valid() {
        assert!(DimensionCodec::minimal().is_valid());
    }

    #[test]
    fn test_sanitize_injects_overworld() {
        let codec = DimensionCodec {
            dimensions: vec![DimensionDefinition::new("minecraft:the_nether", 0, 128, 1)],
        };
        assert!(!codec.is_valid());
        let repaired = codec.sanitized();
        assert!(repaired.is_valid());
        assert_eq!(repaired.dimensions.len(), 2);
        assert_eq!(repaired.dimensions[0].id, OVERWORLD);
    }

    #[test]
    fn test_sanitize_resets_broken_range() {
        let codec = DimensionCodec {
            dimensions: vec![DimensionDefinition::new(OVERWORLD, 0, -5, 1)],
        };
        let repaired = codec.sanitized();
        assert!(repaired.is_valid());
        assert_eq!(repaired.dimensions[0].height, 384);
        assert_eq!(repaired.dimensions[0].min_y, -64);
    }

    #[test]
    fn test_down_convert_keeps_only_overworld() {
        let codec = DimensionCodec {
            dimensions: vec![
                DimensionDefinition::new("minecraft:the_end", 0, 256, 2),
                DimensionDefinition::new(OVERWORLD, -64, 384, 1),
            ],
        };
        let reduced = codec.down_converted();
        assert_eq!(reduced.dimensions.len(), 1);
        assert_eq!(reduced.dimensions[0].id, OVERWORLD);
        assert_eq!(reduced.dimensions[0].height, 384);
    }

    #[test]
    fn test_down_convert_without_overworld_falls_back() {
        let codec = DimensionCodec { dimensions: vec![] };
        let reduced = codec.down_converted();
        assert_eq!(reduced, DimensionCodec::minimal());
    }
}
