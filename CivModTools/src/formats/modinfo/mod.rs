//! Mod manifest (`.modinfo`) format module

mod reader;
mod writer;

pub use reader::{parse_modinfo, parse_modinfo_report, read_modinfo};
pub use writer::{serialize_modinfo, write_modinfo};
