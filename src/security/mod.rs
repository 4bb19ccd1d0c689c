mod network;

pub use network::{allowed_network_middleware, NetworkPolicy};
