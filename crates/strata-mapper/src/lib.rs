pub mod changes;
pub mod ids;
pub mod mapper;
pub mod rules;

pub use changes::*;
pub use ids::*;
pub use mapper::*;
pub use rules::*;
