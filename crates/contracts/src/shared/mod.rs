pub mod artifacts;
pub mod table;
