//! Transport implementations

pub mod console;
pub mod file;
pub mod json;
pub mod memory;

pub use console::ConsoleTransport;
pub use file::FileTransport;
pub use json::JsonTransport;
pub use memory::MemoryTransport;

pub use crate::core::{FnTransport, Transport};
