pub mod api;
pub mod commands;
pub mod models;
pub mod utils;
