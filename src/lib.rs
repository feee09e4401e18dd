#[macro_use]
pub mod common;

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod types;
