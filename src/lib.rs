pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod infrastructure;
pub mod preview;
pub mod render;
pub mod session;
pub mod upload;
