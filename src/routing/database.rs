use crate::error::RouterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbolic database alias
///
/// - `default`: tables owned by this application (auth, sessions, admin log)
/// - `core`: the externally-owned Flow backend schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Default,
    Core,
}

impl Database {
    pub const ALL: [Database; 2] = [Database::Default, Database::Core];

    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Default => "default",
            Database::Core => "core",
        }
    }

    /// The core schema is versioned elsewhere and must never be migrated from here
    pub fn is_externally_managed(&self) -> bool {
        matches!(self, Database::Core)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" => Ok(Database::Default),
            "core" => Ok(Database::Core),
            other => Err(RouterError::UnknownDatabase {
                alias: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("default".parse::<Database>().unwrap(), Database::Default);
        assert_eq!("core".parse::<Database>().unwrap(), Database::Core);
        assert_eq!(" core ".parse::<Database>().unwrap(), Database::Core);
    }

    #[test]
    fn test_parse_unknown_alias() {
        let err = "flow_data".parse::<Database>().unwrap_err();
        assert!(matches!(err, RouterError::UnknownDatabase { alias } if alias == "flow_data"));
    }

    #[test]
    fn test_display_matches_alias() {
        for db in Database::ALL {
            assert_eq!(db.to_string().parse::<Database>().unwrap(), db);
        }
    }

    #[test]
    fn test_only_core_is_externally_managed() {
        assert!(Database::Core.is_externally_managed());
        assert!(!Database::Default.is_externally_managed());
    }
}
