pub mod test_config;
pub mod test_data;
pub mod test_database;

pub use test_config::*;
pub use test_data::*;
pub use test_database::*;
