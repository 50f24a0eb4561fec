pub mod auth;
pub mod backend;
pub mod config;
pub mod database;
pub mod error;
pub mod expenses;
pub mod logging;
