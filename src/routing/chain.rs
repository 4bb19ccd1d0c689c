use super::database::Database;
use super::decision::{MigrationDecision, RelationDecision, RouteDecision};
use super::entity::{EntityDescriptor, EntityRef};
use super::router::DbRouter;
use std::sync::Arc;
use tracing::debug;

/// Host-side resolution over an ordered list of routers
///
/// The first router with an opinion wins. When every router is undecided the
/// chain applies its own defaults, so callers always get a concrete answer.
#[derive(Clone, Default)]
pub struct RouterChain {
    routers: Vec<Arc<dyn DbRouter>>,
}

impl RouterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_router(mut self, router: impl DbRouter + 'static) -> Self {
        self.routers.push(Arc::new(router));
        self
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Resolve the read database, falling back to `hint` then `default`
    pub fn db_for_read(&self, entity: &EntityDescriptor, hint: Option<Database>) -> Database {
        let decision = self.first_routed(|router| router.route_for_read(entity));
        resolve(entity, decision, hint)
    }

    pub fn db_for_write(&self, entity: &EntityDescriptor, hint: Option<Database>) -> Database {
        let decision = self.first_routed(|router| router.route_for_write(entity));
        resolve(entity, decision, hint)
    }

    /// Undecided relations are allowed only between instances on the same database
    pub fn allow_relation(&self, a: &EntityRef, b: &EntityRef) -> bool {
        let allowed = self
            .routers
            .iter()
            .map(|router| router.may_relate(a.group(), b.group()))
            .any(|decision| decision == RelationDecision::Allow);

        if allowed {
            return true;
        }

        let same_database = a.database == b.database;
        debug!(
            "No router decided relation {} <-> {}, same database: {}",
            a.descriptor, b.descriptor, same_database
        );
        same_database
    }

    pub fn allow_migrate(&self, database: Database, group: &str, entity_name: Option<&str>) -> bool {
        match self.routers.first() {
            Some(router) => router.may_migrate(database, group, entity_name).is_allowed(),
            None => MigrationDecision::Allow.is_allowed(),
        }
    }

    fn first_routed<F>(&self, decide: F) -> RouteDecision
    where
        F: Fn(&dyn DbRouter) -> RouteDecision,
    {
        self.routers
            .iter()
            .map(|router| decide(router.as_ref()))
            .find(|decision| !decision.is_undecided())
            .unwrap_or(RouteDecision::Undecided)
    }
}

fn resolve(entity: &EntityDescriptor, decision: RouteDecision, hint: Option<Database>) -> Database {
    match decision {
        RouteDecision::Routed(db) => db,
        RouteDecision::Undecided => {
            let db = hint.unwrap_or(Database::Default);
            debug!("No router decided {}, falling back to {}", entity, db);
            db
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::FlowDbRouter;

    /// Sends everything in `group` to `core`, undecided otherwise
    struct PinGroup(&'static str);

    impl DbRouter for PinGroup {
        fn route_for_read(&self, entity: &EntityDescriptor) -> RouteDecision {
            if entity.group == self.0 {
                RouteDecision::Routed(Database::Core)
            } else {
                RouteDecision::Undecided
            }
        }

        fn route_for_write(&self, entity: &EntityDescriptor) -> RouteDecision {
            self.route_for_read(entity)
        }

        fn may_relate(&self, _group_a: &str, _group_b: &str) -> RelationDecision {
            RelationDecision::Undecided
        }

        fn may_migrate(&self, _database: Database, _group: &str, _entity_name: Option<&str>) -> MigrationDecision {
            MigrationDecision::Allow
        }
    }

    fn flow_chain() -> RouterChain {
        RouterChain::new().with_router(FlowDbRouter::new())
    }

    #[test]
    fn test_routed_decision_wins() {
        let chain = flow_chain();
        let loan = EntityDescriptor::new("flow_data", "loan");
        assert_eq!(chain.db_for_read(&loan, Some(Database::Default)), Database::Core);
        assert_eq!(chain.db_for_write(&loan, None), Database::Core);
    }

    #[test]
    fn test_undecided_falls_back_to_hint_then_default() {
        let chain = flow_chain();
        let user = EntityDescriptor::new("auth", "user");
        assert_eq!(chain.db_for_read(&user, None), Database::Default);
        assert_eq!(chain.db_for_read(&user, Some(Database::Core)), Database::Core);
    }

    #[test]
    fn test_later_router_consulted_when_first_undecided() {
        let chain = flow_chain().with_router(PinGroup("reporting"));
        let report = EntityDescriptor::new("reporting", "daily");
        assert_eq!(chain.db_for_write(&report, None), Database::Core);
    }

    #[test]
    fn test_mixed_relation_denied_across_databases() {
        let chain = flow_chain();
        let loan = EntityRef::new(EntityDescriptor::new("flow_data", "loan"), Database::Core);
        let user = EntityRef::new(EntityDescriptor::new("auth", "user"), Database::Default);
        assert!(!chain.allow_relation(&loan, &user));
    }

    #[test]
    fn test_undecided_relation_same_database_allowed() {
        let chain = RouterChain::new().with_router(PinGroup("reporting"));
        let a = EntityRef::new(EntityDescriptor::new("flow_data", "loan"), Database::Core);
        let b = EntityRef::new(EntityDescriptor::new("auth", "user"), Database::Core);
        assert!(chain.allow_relation(&a, &b));
    }

    #[test]
    fn test_migrate_uses_first_router() {
        let chain = flow_chain().with_router(PinGroup("reporting"));
        assert!(!chain.allow_migrate(Database::Core, "reporting", None));
        assert!(chain.allow_migrate(Database::Default, "reporting", None));
    }

    #[test]
    fn test_empty_chain_defaults() {
        let chain = RouterChain::new();
        assert!(chain.is_empty());
        let loan = EntityDescriptor::new("flow_data", "loan");
        assert_eq!(chain.db_for_read(&loan, None), Database::Default);
        assert!(chain.allow_migrate(Database::Core, "flow_data", None));
    }
}
