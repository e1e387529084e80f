pub mod api;
pub mod commands;
pub mod config;
pub mod data_models;
pub mod error;
pub mod query;
pub mod reply;
pub mod search;
