pub mod analysis;
pub mod api_connection;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod models;
pub mod planner;
pub mod preferences;
pub mod server;
