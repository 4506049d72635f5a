pub mod commands;
pub mod config;
pub mod render;
pub mod resolver;
pub mod rule;
pub mod runtime;
pub mod server;
