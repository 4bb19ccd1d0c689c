//! CLI tool to print where every registered entity is routed
//!
//! Usage:
//!   cargo run --bin route-table
//!   cargo run --bin route-table -- flow_data

use std::env;

use flowdb_router::catalog::EntityCatalog;
use flowdb_router::migration::MigrationPlanner;
use flowdb_router::routing::{Database, FlowDbRouter, RouterChain};

fn main() {
    let group_filter = env::args().nth(1);

    let catalog = match EntityCatalog::standard() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error building entity catalog: {}", e);
            std::process::exit(1);
        }
    };
    let chain = RouterChain::new().with_router(FlowDbRouter::new());

    println!("{:<14} {:<24} {:<26} {:<8} {}", "GROUP", "ENTITY", "TABLE", "DATABASE", "MANAGED");

    for entry in catalog.iter() {
        if let Some(group) = &group_filter {
            if entry.group() != group.as_str() {
                continue;
            }
        }

        let database = chain.db_for_read(&entry.descriptor, None);
        println!(
            "{:<14} {:<24} {:<26} {:<8} {}",
            entry.descriptor.group,
            entry.descriptor.name,
            entry.table,
            database,
            if entry.managed { "yes" } else { "no" }
        );
    }

    println!();

    for database in Database::ALL {
        let plan = MigrationPlanner::new(&catalog, &chain).plan(database);
        if plan.is_empty() {
            println!("Migrations on {}: none", database);
        } else {
            println!("Migrations on {}: {}", database, plan.tables().join(", "));
        }
    }
}
