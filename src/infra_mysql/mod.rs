mod user_persistence_mysql;

pub use user_persistence_mysql::*;

mod util;

pub use util::{connect_pool, is_dup_key};
