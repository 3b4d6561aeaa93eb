pub mod error;
pub mod result;
pub mod telemetry;

pub use result::Result;
