pub mod cli;
pub mod config_loader;
pub mod app_config;
pub mod blink_config;
pub mod errors;
pub mod camera;
pub mod core;
pub mod operations;
pub mod settings;
pub mod common;
