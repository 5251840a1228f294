pub mod download;
pub mod info;
pub mod search;
