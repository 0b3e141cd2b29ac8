mod user_persistence_memory;

pub use user_persistence_memory::*;
