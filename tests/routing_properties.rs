use flowdb_router::catalog::EntityCatalog;
use flowdb_router::routing::{
    Database, DbRouter, EntityDescriptor, EntityRef, FlowDbRouter, MigrationDecision,
    RelationDecision, RouteDecision, RouterChain, FLOW_DATA_GROUP,
};

const OTHER_GROUPS: &[&str] = &["accounts_app", "billing", "auth", "sessions", "", "Flow_Data"];

fn all_groups() -> Vec<&'static str> {
    let mut groups = vec![FLOW_DATA_GROUP];
    groups.extend_from_slice(OTHER_GROUPS);
    groups
}

#[test]
fn test_read_write_symmetry() {
    let router = FlowDbRouter::new();
    for group in all_groups() {
        let entity = EntityDescriptor::new(group, "entity");
        assert_eq!(router.route_for_read(&entity), router.route_for_write(&entity));
    }
}

#[test]
fn test_flow_data_always_core() {
    let router = FlowDbRouter::new();
    let catalog = EntityCatalog::standard().unwrap();
    for entry in catalog.in_group(FLOW_DATA_GROUP) {
        assert_eq!(
            router.route_for_read(&entry.descriptor),
            RouteDecision::Routed(Database::Core)
        );
    }
}

#[test]
fn test_other_groups_undecided() {
    let router = FlowDbRouter::new();
    for group in OTHER_GROUPS {
        let entity = EntityDescriptor::new(*group, "entity");
        assert_eq!(router.route_for_read(&entity), RouteDecision::Undecided);
    }
}

#[test]
fn test_relation_matrix() {
    let router = FlowDbRouter::new();
    for a in all_groups() {
        for b in all_groups() {
            let expected = if (a == FLOW_DATA_GROUP) == (b == FLOW_DATA_GROUP) {
                RelationDecision::Allow
            } else {
                RelationDecision::Undecided
            };
            assert_eq!(router.may_relate(a, b), expected, "relate {:?} <-> {:?}", a, b);
        }
    }
}

// Mixed-group pairs are left undecided by the router rather than denied.
// Whether that is intended policy or an oversight is open; the host chain
// turns it into a denial because the two sides live on different databases.
#[test]
fn test_mixed_relation_undecided_then_denied_by_host() {
    let router = FlowDbRouter::new();
    assert_eq!(
        router.may_relate(FLOW_DATA_GROUP, "accounts_app"),
        RelationDecision::Undecided
    );

    let chain = RouterChain::new().with_router(router);
    let loan_descriptor = EntityDescriptor::new(FLOW_DATA_GROUP, "loan");
    let profile_descriptor = EntityDescriptor::new("accounts_app", "profile");
    let loan = EntityRef::new(loan_descriptor.clone(), chain.db_for_read(&loan_descriptor, None));
    let profile = EntityRef::new(
        profile_descriptor.clone(),
        chain.db_for_read(&profile_descriptor, None),
    );
    assert!(!chain.allow_relation(&loan, &profile));
}

#[test]
fn test_migration_matrix() {
    let router = FlowDbRouter::new();

    assert_eq!(
        router.may_migrate(Database::Default, FLOW_DATA_GROUP, None),
        MigrationDecision::Deny
    );
    for group in OTHER_GROUPS {
        assert_eq!(
            router.may_migrate(Database::Default, group, None),
            MigrationDecision::Allow
        );
    }
    for group in all_groups() {
        assert_eq!(
            router.may_migrate(Database::Core, group, Some("entity")),
            MigrationDecision::Deny
        );
    }
}

#[test]
fn test_repeated_calls_identical() {
    let router = FlowDbRouter::new();
    for group in all_groups() {
        let entity = EntityDescriptor::new(group, "entity");
        assert_eq!(router.route_for_read(&entity), router.route_for_read(&entity));
        assert_eq!(router.may_relate(group, "auth"), router.may_relate(group, "auth"));
        for db in Database::ALL {
            assert_eq!(router.may_migrate(db, group, None), router.may_migrate(db, group, None));
        }
    }
}

#[test]
fn test_concurrent_decisions_agree() {
    let router = std::sync::Arc::new(FlowDbRouter::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let router = router.clone();
            std::thread::spawn(move || {
                let loan = EntityDescriptor::new(FLOW_DATA_GROUP, "loan");
                (0..1000)
                    .map(|_| router.route_for_write(&loan))
                    .all(|decision| decision == RouteDecision::Routed(Database::Core))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_example_scenarios() {
    let router = FlowDbRouter::new();

    // 1. flow_data read goes to core
    assert_eq!(
        router.route_for_read(&EntityDescriptor::new("flow_data", "account")),
        RouteDecision::Routed(Database::Core)
    );
    // 2. application write is left to the caller, which uses default
    let write = router.route_for_write(&EntityDescriptor::new("accounts_app", "profile"));
    assert_eq!(write, RouteDecision::Undecided);
    assert_eq!(write.or(Database::Default), Database::Default);
    // 3. mixed relation undecided
    assert_eq!(
        router.may_relate("flow_data", "accounts_app"),
        RelationDecision::Undecided
    );
    // 4. app migration on default allowed
    assert_eq!(
        router.may_migrate(Database::Default, "accounts_app", None),
        MigrationDecision::Allow
    );
    // 5. core never migrated
    assert_eq!(
        router.may_migrate(Database::Core, "flow_data", None),
        MigrationDecision::Deny
    );
}
