mod memory;
mod rest_directory;

pub use memory::{MemoryDirectory, MemoryLedger};
pub use rest_directory::RestDirectory;
