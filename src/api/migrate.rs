use super::AppState;
use crate::error::Result;
use crate::migration::{MigrationPlan, MigrationPlanner};
use crate::routing::{Database, DbRouter, MigrationDecision};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct MigrateQuery {
    pub database: String,
    pub group: String,
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct MigrateResponse {
    database: Database,
    group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    decision: MigrationDecision,
}

pub async fn check_migrate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MigrateQuery>,
) -> Result<Json<MigrateResponse>> {
    let database: Database = query.database.parse()?;
    let decision = state
        .router
        .may_migrate(database, &query.group, query.name.as_deref());

    Ok(Json(MigrateResponse {
        database,
        group: query.group,
        name: query.name,
        decision,
    }))
}

pub async fn migration_plan(
    State(state): State<Arc<AppState>>,
    Path(database): Path<String>,
) -> Result<Json<MigrationPlan>> {
    let database: Database = database.parse()?;
    let plan = MigrationPlanner::new(&state.catalog, &state.chain).plan(database);

    info!(
        "Migration plan requested for {}: {} tables",
        database,
        plan.included.len()
    );

    Ok(Json(plan))
}
