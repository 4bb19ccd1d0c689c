use super::database::Database;
use serde::Serialize;

/// Outcome of a read or write routing hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "database", rename_all = "snake_case")]
pub enum RouteDecision {
    Routed(Database),
    /// Let the caller fall back to its own default
    Undecided,
}

impl RouteDecision {
    pub fn database(&self) -> Option<Database> {
        match self {
            RouteDecision::Routed(db) => Some(*db),
            RouteDecision::Undecided => None,
        }
    }

    pub fn or(self, fallback: Database) -> Database {
        self.database().unwrap_or(fallback)
    }

    pub fn is_undecided(&self) -> bool {
        matches!(self, RouteDecision::Undecided)
    }
}

/// Outcome of the relation-permission hook
///
/// There is deliberately no `Deny`: mixed-group pairs are left undecided and
/// the host applies its own policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationDecision {
    Allow,
    Undecided,
}

impl RelationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RelationDecision::Allow)
    }
}

/// Outcome of the migration-permission hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationDecision {
    Allow,
    Deny,
}

impl MigrationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, MigrationDecision::Allow)
    }
}

impl From<bool> for MigrationDecision {
    fn from(allowed: bool) -> Self {
        if allowed {
            MigrationDecision::Allow
        } else {
            MigrationDecision::Deny
        }
    }
}
