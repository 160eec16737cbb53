pub mod cache;
pub mod handlers;
pub mod translator;

pub use cache::*;
pub use handlers::*;
pub use translator::*;
