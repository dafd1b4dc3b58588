#![warn(clippy::all)]

pub mod config;
pub mod routes;
pub mod scoring;
pub mod store;
pub mod types;
pub mod validation;
