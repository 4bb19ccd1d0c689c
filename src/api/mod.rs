//! Read-only admin introspection endpoints
//!
//! Lists the registered entities with the database each one resolves to and
//! exposes the routing hooks for ad-hoc checks.

mod databases;
mod entities;
mod health;
mod migrate;

use crate::catalog::EntityCatalog;
use crate::routing::{Database, FlowDbRouter, RouterChain};
use axum::{routing::get, Router};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

pub struct AppState {
    pub catalog: EntityCatalog,
    pub router: FlowDbRouter,
    pub chain: RouterChain,
    /// Connection URL per alias, shown redacted
    pub databases: BTreeMap<Database, String>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(catalog: EntityCatalog, databases: BTreeMap<Database, String>) -> Self {
        let router = FlowDbRouter::new();
        Self {
            catalog,
            router,
            chain: RouterChain::new().with_router(router),
            databases,
            start_time: Instant::now(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/entities", get(entities::list_entities))
        .route("/entities/:group/:name", get(entities::get_entity))
        .route("/route", get(entities::route_entity))
        .route("/relation", get(entities::check_relation))
        .route("/migrate", get(migrate::check_migrate))
        .route("/migrations/:database", get(migrate::migration_plan))
        .route("/databases", get(databases::list_databases))
        .with_state(state)
}
