use super::AppState;
use crate::catalog::CatalogEntry;
use crate::error::Result;
use crate::routing::{Database, DbRouter, EntityDescriptor, RelationDecision, RouteDecision};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ListEntitiesQuery {
    pub group: Option<String>,
}

#[derive(Serialize)]
pub struct EntityRoute {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub database: Database,
}

pub async fn list_entities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListEntitiesQuery>,
) -> Json<Vec<EntityRoute>> {
    let entities = state
        .catalog
        .iter()
        .filter(|entry| query.group.as_deref().map_or(true, |g| entry.group() == g))
        .map(|entry| EntityRoute {
            entry: entry.clone(),
            database: state.chain.db_for_read(&entry.descriptor, None),
        })
        .collect();

    Json(entities)
}

pub async fn get_entity(
    State(state): State<Arc<AppState>>,
    Path((group, name)): Path<(String, String)>,
) -> Result<Json<EntityRoute>> {
    let entry = state.catalog.lookup(&group, &name)?;

    Ok(Json(EntityRoute {
        entry: entry.clone(),
        database: state.chain.db_for_read(&entry.descriptor, None),
    }))
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Read,
    Write,
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub group: String,
    pub name: String,
    #[serde(default)]
    pub op: Operation,
}

#[derive(Serialize)]
pub struct RouteResponse {
    entity: EntityDescriptor,
    operation: Operation,
    #[serde(flatten)]
    decision: RouteDecision,
    /// Database after the caller's default is applied
    resolved: Database,
}

/// Any group gets a decision, registered or not
pub async fn route_entity(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Json<RouteResponse> {
    let entity = EntityDescriptor::new(query.group, query.name);

    let (decision, resolved) = match query.op {
        Operation::Read => (
            state.router.route_for_read(&entity),
            state.chain.db_for_read(&entity, None),
        ),
        Operation::Write => (
            state.router.route_for_write(&entity),
            state.chain.db_for_write(&entity, None),
        ),
    };

    Json(RouteResponse {
        entity,
        operation: query.op,
        decision,
        resolved,
    })
}

#[derive(Debug, Deserialize)]
pub struct RelationQuery {
    pub a: String,
    pub b: String,
}

#[derive(Serialize)]
pub struct RelationResponse {
    a: String,
    b: String,
    decision: RelationDecision,
    /// Undecided counts as not allowed
    allowed: bool,
}

pub async fn check_relation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RelationQuery>,
) -> Json<RelationResponse> {
    let decision = state.router.may_relate(&query.a, &query.b);

    Json(RelationResponse {
        allowed: decision.is_allowed(),
        a: query.a,
        b: query.b,
        decision,
    })
}
