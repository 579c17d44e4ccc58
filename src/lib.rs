pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod stats;

pub use error::{Error, Result};
