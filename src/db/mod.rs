pub mod connection;
pub mod tables;

pub use connection::{init_db, Database};
