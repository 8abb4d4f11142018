//! Soula - cloud-drive resource catalog service
//!
//! Aggregates resources harvested from external channels into a searchable
//! catalog and serves browsing, random discovery, keyword search, hot-term
//! tracking and friend-link promotion over HTTP.
//!
//! # Architecture
//! - `catalog`: pagination, view growth, friend-link ranking, hot-term tracker
//! - `storage`: repository traits and the SeaORM backend
//! - `services`: catalog and friend-link business logic
//! - `plugin`: explicit plugin registry
//! - `api`: HTTP services and middleware
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod plugin;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
