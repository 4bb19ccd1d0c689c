use super::AppState;
use crate::config::redact_url;
use crate::routing::Database;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct DatabaseInfo {
    alias: Database,
    url: String,
    /// Schema owned elsewhere, never migrated from here
    externally_managed: bool,
}

pub async fn list_databases(State(state): State<Arc<AppState>>) -> Json<Vec<DatabaseInfo>> {
    let databases = state
        .databases
        .iter()
        .map(|(alias, url)| DatabaseInfo {
            alias: *alias,
            url: redact_url(url),
            externally_managed: alias.is_externally_managed(),
        })
        .collect();

    Json(databases)
}
