use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use ipnetwork::IpNetwork;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::warn;

/// Networks allowed to reach the admin surface. Loopback is always allowed.
#[derive(Debug, Clone)]
pub struct NetworkPolicy {
    allowed_networks: Vec<IpNetwork>,
}

impl NetworkPolicy {
    pub fn new(allowed_networks: Vec<IpNetwork>) -> Self {
        Self { allowed_networks }
    }

    pub fn is_allowed(&self, ip: IpAddr) -> bool {
        ip.is_loopback() || self.allowed_networks.iter().any(|network| network.contains(ip))
    }

    /// Forwarded address from an allowed peer, otherwise the peer itself
    pub fn client_ip(&self, peer_ip: IpAddr, forwarded_ip: Option<IpAddr>) -> IpAddr {
        match forwarded_ip {
            Some(ip) if self.is_allowed(peer_ip) => ip,
            _ => peer_ip,
        }
    }
}

/// Rejects requests whose client IP is outside the policy
///
/// The connection address is authoritative. `X-Forwarded-For` is honoured only
/// when the connecting peer is itself allowed (a proxy in front of us), and
/// then the forwarded client must be allowed too. A request without a
/// connection address is rejected.
pub async fn allowed_network_middleware(
    State(policy): State<Arc<NetworkPolicy>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(peer_ip) = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip())
    else {
        warn!("Rejected admin request: could not determine client IP");
        return Err(StatusCode::FORBIDDEN);
    };

    let forwarded_ip = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|s| s.trim().parse::<IpAddr>().ok());

    let client_ip = policy.client_ip(peer_ip, forwarded_ip);

    if policy.is_allowed(peer_ip) && policy.is_allowed(client_ip) {
        Ok(next.run(req).await)
    } else {
        warn!("Rejected admin request from IP: {} (peer {})", client_ip, peer_ip);
        Err(StatusCode::FORBIDDEN)
    }
}
