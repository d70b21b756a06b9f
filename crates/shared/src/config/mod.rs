mod database;
mod env;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::env::{flag, parse_bool_strict, parse_or};
