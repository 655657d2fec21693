pub mod ask;
pub mod memory;
pub mod system;
