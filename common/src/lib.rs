pub mod config;
pub mod files;
pub mod models;
pub mod params;
pub mod path;
pub mod restrict;
pub mod text;
