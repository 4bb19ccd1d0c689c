//! Database routing
//!
//! Decides, per entity, which physical database an operation targets,
//! whether two entities may be related, and whether migrations may run.
//!
//! Decisions are three-valued: a router may defer to the host's default
//! resolution instead of guessing. [`RouterChain`] is that host-side
//! resolution.
//!
//! Routing is only as correct as the group tags on the entities. An entity
//! tagged with the wrong group routes to the wrong database and nothing here
//! detects it.

mod chain;
mod database;
mod decision;
mod entity;
mod router;

pub use chain::RouterChain;
pub use database::Database;
pub use decision::{MigrationDecision, RelationDecision, RouteDecision};
pub use entity::{EntityDescriptor, EntityRef};
pub use router::{DbRouter, FlowDbRouter, FLOW_DATA_GROUP};
