pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod retry;
pub mod validation;
