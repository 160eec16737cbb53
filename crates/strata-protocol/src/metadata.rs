use strata_types::{BlockPos, Vec3};

/// Metadata value type IDs.
pub const DATA_BYTE: u8 = 0;
pub const DATA_SHORT: u8 = 1;
pub const DATA_INT: u8 = 2;
pub const DATA_FLOAT: u8 = 3;
pub const DATA_STRING: u8 = 4;
pub const DATA_POS: u8 = 6;
pub const DATA_LONG: u8 = 7;
pub const DATA_VEC3: u8 = 8;

/// A single entity metadata entry: numeric field id plus typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub id: u32,
    pub value: MetadataValue,
}

impl MetadataEntry {
    pub fn new(id: u32, value: MetadataValue) -> Self {
        Self { id, value }
    }
}

/// An entity metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Float(f32),
    String(String),
    Pos(BlockPos),
    Long(i64),
    Vec3(Vec3),
}

impl MetadataValue {
    pub fn type_id(&self) -> u8 {
        match self {
            MetadataValue::Byte(_) => DATA_BYTE,
            MetadataValue::Short(_) => DATA_SHORT,
            MetadataValue::Int(_) => DATA_INT,
            MetadataValue::Float(_) => DATA_FLOAT,
            MetadataValue::String(_) => DATA_STRING,
            MetadataValue::Pos(_) => DATA_POS,
            MetadataValue::Long(_) => DATA_LONG,
            MetadataValue::Vec3(_) => DATA_VEC3,
        }
    }
}
