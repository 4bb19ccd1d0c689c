use super::database::Database;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a data entity by its group tag and name
///
/// Supplied by the caller at decision time. The group is compared by
/// equality only, so an unknown group is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub group: String,
    pub name: String,
}

impl EntityDescriptor {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

/// A loaded entity instance: its descriptor plus the database it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub descriptor: EntityDescriptor,
    pub database: Database,
}

impl EntityRef {
    pub fn new(descriptor: EntityDescriptor, database: Database) -> Self {
        Self {
            descriptor,
            database,
        }
    }

    pub fn group(&self) -> &str {
        &self.descriptor.group
    }
}
