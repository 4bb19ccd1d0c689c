use crate::catalog::{CatalogEntry, EntityCatalog};
use crate::routing::{Database, RouterChain};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The router chain refused migrations for this entity on the target database
    RouterDenied,
    /// The table exists but is not owned by this application
    Unmanaged,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntity {
    pub entity: CatalogEntry,
    pub reason: SkipReason,
}

/// Which catalog entities a migration run against one database would touch
#[derive(Debug, Clone, Serialize)]
pub struct MigrationPlan {
    pub database: Database,
    pub included: Vec<CatalogEntry>,
    pub skipped: Vec<SkippedEntity>,
    pub planned_at: DateTime<Utc>,
}

impl MigrationPlan {
    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    pub fn tables(&self) -> Vec<&str> {
        self.included.iter().map(|entry| entry.table.as_str()).collect()
    }
}

pub struct MigrationPlanner<'a> {
    catalog: &'a EntityCatalog,
    chain: &'a RouterChain,
}

impl<'a> MigrationPlanner<'a> {
    pub fn new(catalog: &'a EntityCatalog, chain: &'a RouterChain) -> Self {
        Self { catalog, chain }
    }

    pub fn plan(&self, database: Database) -> MigrationPlan {
        let mut included = Vec::new();
        let mut skipped = Vec::new();

        for entry in self.catalog.iter() {
            let descriptor = &entry.descriptor;

            // Router denial takes precedence over the unmanaged flag
            if !self
                .chain
                .allow_migrate(database, &descriptor.group, Some(descriptor.name.as_str()))
            {
                debug!("Skipping {} on {}: router denied", descriptor, database);
                skipped.push(SkippedEntity {
                    entity: entry.clone(),
                    reason: SkipReason::RouterDenied,
                });
                continue;
            }

            if !entry.managed {
                debug!("Skipping {} on {}: unmanaged", descriptor, database);
                skipped.push(SkippedEntity {
                    entity: entry.clone(),
                    reason: SkipReason::Unmanaged,
                });
                continue;
            }

            included.push(entry.clone());
        }

        if database.is_externally_managed() && !included.is_empty() {
            warn!(
                "Migration plan for externally managed database {} includes {} entities",
                database,
                included.len()
            );
        }

        info!(
            "Planned migrations for {}: {} included, {} skipped",
            database,
            included.len(),
            skipped.len()
        );

        MigrationPlan {
            database,
            included,
            skipped,
            planned_at: Utc::now(),
        }
    }
}
