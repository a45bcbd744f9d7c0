pub mod migrations;
pub mod models;
pub mod queries;
pub use migrations::{create_session_pool, setup_database};
