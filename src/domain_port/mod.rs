mod user_persistence;

pub use user_persistence::*;
