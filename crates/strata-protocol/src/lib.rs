pub mod dimension;
pub mod metadata;
pub mod packets;

pub use dimension::*;
pub use metadata::*;
pub use packets::*;
