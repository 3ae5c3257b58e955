pub mod config;
pub mod data;
pub mod format;
pub mod table;
pub mod view;
