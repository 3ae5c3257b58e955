pub mod artifacts;
pub mod dashboard;
