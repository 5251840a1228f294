pub mod config;
pub mod mod_info;
