pub mod disk;
pub mod memory;

pub use disk::DiskSnapshot;
pub use memory::MemorySnapshot;
