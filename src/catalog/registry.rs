use crate::error::{Result, RouterError};
use crate::routing::EntityDescriptor;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A registered entity and the table backing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub descriptor: EntityDescriptor,
    pub table: String,
    /// Unmanaged tables are never created or altered by migrations
    pub managed: bool,
}

impl CatalogEntry {
    pub fn managed(group: &str, name: &str, table: &str) -> Self {
        Self {
            descriptor: EntityDescriptor::new(group, name),
            table: table.to_string(),
            managed: true,
        }
    }

    pub fn unmanaged(group: &str, name: &str, table: &str) -> Self {
        Self {
            managed: false,
            ..Self::managed(group, name, table)
        }
    }

    pub fn group(&self) -> &str {
        &self.descriptor.group
    }
}

/// Registry of entities keyed by (group, name), iterated in key order
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entries: BTreeMap<(String, String), CatalogEntry>,
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CatalogEntry) -> Result<()> {
        let key = (entry.descriptor.group.clone(), entry.descriptor.name.clone());

        if self.entries.contains_key(&key) {
            return Err(RouterError::AlreadyRegistered {
                entity: entry.descriptor.to_string(),
            });
        }

        debug!("Registered entity {} (table {})", entry.descriptor, entry.table);
        self.entries.insert(key, entry);
        Ok(())
    }

    pub fn get(&self, group: &str, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(&(group.to_string(), name.to_string()))
    }

    /// Like [`get`](Self::get) but reports a missing entity as an error
    pub fn lookup(&self, group: &str, name: &str) -> Result<&CatalogEntry> {
        self.get(group, name).ok_or_else(|| RouterError::UnknownEntity {
            group: group.to_string(),
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.values().filter(move |entry| entry.group() == group)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
