//! The `utils` module holds what every other module shares: the crate-wide
//! error type and the logging bootstrap used by the binary.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
