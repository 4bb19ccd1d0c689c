use super::registry::{CatalogEntry, EntityCatalog};
use crate::error::Result;
use crate::routing::FLOW_DATA_GROUP;

/// Flow backend entities: (name, table). All unmanaged, the schema lives elsewhere.
const FLOW_DATA_ENTITIES: &[(&str, &str)] = &[
    ("accountable", "accountables"),
    ("account", "accounts"),
    ("account_history", "accounts_history"),
    ("beneficiary", "beneficiaries"),
    ("business", "businesses"),
    ("business_history", "businesses_history"),
    ("client", "clients"),
    ("data_broker", "data_broker"),
    ("integration", "integrations"),
    ("loan", "loans"),
    ("loan_history", "loans_history"),
    ("payment", "payments"),
    ("person", "persons"),
    ("persons_history", "persons_history"),
    ("refresh_token", "refresh_tokens"),
    ("refresh_tokens_history", "refresh_tokens_history"),
    ("schema_migration", "schema_migrations"),
    ("transaction", "transactions"),
    ("users", "users"),
    ("webhook_endpoint", "webhook_endpoints"),
];

/// Application-owned entities: (group, name, table)
const APP_ENTITIES: &[(&str, &str, &str)] = &[
    ("admin", "logentry", "django_admin_log"),
    ("auth", "group", "auth_group"),
    ("auth", "permission", "auth_permission"),
    ("auth", "user", "auth_user"),
    ("contenttypes", "contenttype", "django_content_type"),
    ("sessions", "session", "django_session"),
];

impl EntityCatalog {
    /// The full set of entities served by this application
    pub fn standard() -> Result<Self> {
        let mut catalog = Self::new();

        for (name, table) in FLOW_DATA_ENTITIES {
            catalog.register(CatalogEntry::unmanaged(FLOW_DATA_GROUP, name, table))?;
        }

        for (group, name, table) in APP_ENTITIES {
            catalog.register(CatalogEntry::managed(group, name, table))?;
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_complete() {
        let catalog = EntityCatalog::standard().unwrap();
        assert_eq!(catalog.len(), FLOW_DATA_ENTITIES.len() + APP_ENTITIES.len());
        assert_eq!(catalog.in_group(FLOW_DATA_GROUP).count(), 20);
    }

    #[test]
    fn test_flow_data_entities_unmanaged() {
        let catalog = EntityCatalog::standard().unwrap();
        assert!(catalog.in_group(FLOW_DATA_GROUP).all(|entry| !entry.managed));
        assert!(catalog
            .iter()
            .filter(|entry| entry.group() != FLOW_DATA_GROUP)
            .all(|entry| entry.managed));
    }

    #[test]
    fn test_standard_tables() {
        let catalog = EntityCatalog::standard().unwrap();
        assert_eq!(catalog.get("flow_data", "loan").unwrap().table, "loans");
        assert_eq!(catalog.get("auth", "user").unwrap().table, "auth_user");
    }
}
