pub mod config;
pub mod database;
pub mod entity;
pub mod lang;
pub mod performance;
pub mod validation;

pub use config::Config;
pub use database::get_db_connection;
pub use lang::Lang;
pub use validation::{AccountPatch, NewAccount, ValidationError};
