pub mod actors;
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod health;
pub mod metrics;
pub mod models;
pub mod telemetry;
pub mod utils;
