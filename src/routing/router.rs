use super::database::Database;
use super::decision::{MigrationDecision, RelationDecision, RouteDecision};
use super::entity::EntityDescriptor;
use tracing::trace;

/// Group tag of the externally-owned Flow backend entities
pub const FLOW_DATA_GROUP: &str = "flow_data";

/// Hooks consulted by the data-access layer once per operation
///
/// Implementations must be pure: the same inputs always give the same
/// decision, so a router can be shared across threads without locking.
pub trait DbRouter: Send + Sync {
    fn route_for_read(&self, entity: &EntityDescriptor) -> RouteDecision;

    fn route_for_write(&self, entity: &EntityDescriptor) -> RouteDecision;

    fn may_relate(&self, group_a: &str, group_b: &str) -> RelationDecision;

    /// `entity_name` is `None` when the migration covers the whole group
    fn may_migrate(
        &self,
        database: Database,
        group: &str,
        entity_name: Option<&str>,
    ) -> MigrationDecision;
}

/// Partitions entities between the application database and the core database
///
/// - `flow_data` entities live on `core`
/// - everything else is left to the caller, which resolves to `default`
/// - `core` is never migrated
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowDbRouter;

impl FlowDbRouter {
    pub fn new() -> Self {
        Self
    }

    fn decide_on_entity(entity: &EntityDescriptor) -> RouteDecision {
        if is_flow_data(&entity.group) {
            RouteDecision::Routed(Database::Core)
        } else {
            RouteDecision::Undecided
        }
    }
}

impl DbRouter for FlowDbRouter {
    fn route_for_read(&self, entity: &EntityDescriptor) -> RouteDecision {
        let decision = Self::decide_on_entity(entity);
        trace!("read route for {}: {:?}", entity, decision);
        decision
    }

    // No read/write split: writes follow exactly the read policy
    fn route_for_write(&self, entity: &EntityDescriptor) -> RouteDecision {
        let decision = Self::decide_on_entity(entity);
        trace!("write route for {}: {:?}", entity, decision);
        decision
    }

    fn may_relate(&self, group_a: &str, group_b: &str) -> RelationDecision {
        // Same side of the partition in both cases; a mixed pair stays undecided
        if is_flow_data(group_a) == is_flow_data(group_b) {
            RelationDecision::Allow
        } else {
            trace!("relation {} <-> {} left undecided", group_a, group_b);
            RelationDecision::Undecided
        }
    }

    fn may_migrate(
        &self,
        database: Database,
        group: &str,
        _entity_name: Option<&str>,
    ) -> MigrationDecision {
        let allowed = database == Database::Default && !is_flow_data(group);
        trace!("migrate {} on {}: allowed={}", group, database, allowed);
        MigrationDecision::from(allowed)
    }
}

fn is_flow_data(group: &str) -> bool {
    group == FLOW_DATA_GROUP
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(group: &str) -> EntityDescriptor {
        EntityDescriptor::new(group, "thing")
    }

    #[test]
    fn test_flow_data_routes_to_core() {
        let router = FlowDbRouter::new();
        assert_eq!(
            router.route_for_read(&entity("flow_data")),
            RouteDecision::Routed(Database::Core)
        );
        assert_eq!(
            router.route_for_write(&entity("flow_data")),
            RouteDecision::Routed(Database::Core)
        );
    }

    #[test]
    fn test_other_groups_undecided() {
        let router = FlowDbRouter::new();
        for group in ["accounts_app", "auth", "", "FLOW_DATA", "flow_data "] {
            assert_eq!(router.route_for_read(&entity(group)), RouteDecision::Undecided);
            assert_eq!(router.route_for_write(&entity(group)), RouteDecision::Undecided);
        }
    }

    #[test]
    fn test_may_relate_same_side() {
        let router = FlowDbRouter::new();
        assert_eq!(router.may_relate("flow_data", "flow_data"), RelationDecision::Allow);
        assert_eq!(router.may_relate("auth", "sessions"), RelationDecision::Allow);
        assert_eq!(router.may_relate("auth", "auth"), RelationDecision::Allow);
    }

    #[test]
    fn test_may_relate_mixed_is_undecided_not_denied() {
        let router = FlowDbRouter::new();
        assert_eq!(router.may_relate("flow_data", "accounts_app"), RelationDecision::Undecided);
        assert_eq!(router.may_relate("accounts_app", "flow_data"), RelationDecision::Undecided);
    }

    #[test]
    fn test_may_migrate() {
        let router = FlowDbRouter::new();
        assert_eq!(
            router.may_migrate(Database::Default, "billing", None),
            MigrationDecision::Allow
        );
        assert_eq!(
            router.may_migrate(Database::Default, "flow_data", None),
            MigrationDecision::Deny
        );
        assert_eq!(
            router.may_migrate(Database::Core, "flow_data", Some("loan")),
            MigrationDecision::Deny
        );
        assert_eq!(
            router.may_migrate(Database::Core, "auth", Some("user")),
            MigrationDecision::Deny
        );
    }
}
