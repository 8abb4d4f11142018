//! Mode routing
//!
//! The HTTP server is the default mode; one-shot maintenance commands live
//! in `crate::cli::commands`.

pub mod server;

pub use server::{configure_app, run_server};
