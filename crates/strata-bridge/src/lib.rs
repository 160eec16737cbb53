pub mod bridge;
pub mod config;
pub mod diagnostics;
pub mod metrics;
pub mod session;

pub use bridge::*;
pub use config::*;
pub use diagnostics::*;
pub use metrics::*;
pub use session::*;
