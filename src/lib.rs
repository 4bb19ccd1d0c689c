//! FlowDB Router Library
//!
//! Multi-database routing policy for the Flow admin application: the
//! application's own tables live on `default`, the externally-owned Flow
//! backend schema (`flow_data` entities) lives on `core`.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod migration;
pub mod routing;
pub mod security;
