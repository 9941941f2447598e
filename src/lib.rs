pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod schedule;
pub mod store;
