//! System-level modules
//!
//! Process concerns that are not part of the catalog itself.

pub mod logging;
