// Conversion engine - independent of the CLI

pub mod core;
pub mod pipeline;
pub mod probe;

pub use core::*;
pub use pipeline::Converter;
pub use probe::{parse_probe_output, probe};
