//! Error types produced while walking defaults and loading configuration.

mod aggregate;
mod conversion;
mod types;

pub use aggregate::WalkError;
pub use conversion::{ConversionError, LiteralError};
pub use types::ConfigError;
