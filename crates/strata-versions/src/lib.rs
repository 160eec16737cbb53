pub mod features;
pub mod registry;
pub mod table;

pub use features::*;
pub use registry::*;
pub use table::*;
