pub mod backup;
pub mod config;
pub mod month;
pub mod track;
