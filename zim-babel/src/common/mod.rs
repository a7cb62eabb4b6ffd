//! Helpers shared by several dumpers

pub mod linker;
pub mod resources;
pub mod table;

pub use linker::Linker;
pub use resources::collect_resources;
