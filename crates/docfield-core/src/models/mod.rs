//! Data models: records, requests and configuration.

pub mod config;
pub mod record;
pub mod request;
