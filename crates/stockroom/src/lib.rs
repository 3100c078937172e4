pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod errors;
pub mod executor;
pub mod listing;
pub mod logging;
pub mod tui;
