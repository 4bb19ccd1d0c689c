use crate::error::{Result, RouterError};
use crate::routing::Database;
use ipnetwork::IpNetwork;
use std::collections::BTreeMap;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URL per alias. Reported only, never connected to here.
    pub databases: BTreeMap<Database, String>,
    pub router_host: String,
    pub router_port: u16,
    pub allowed_networks: Vec<IpNetwork>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut databases = BTreeMap::new();
        databases.insert(Database::Default, database_url_from_env("DATABASE_URL", "DB")?);
        databases.insert(Database::Core, database_url_from_env("CORE_DATABASE_URL", "CORE_DB")?);

        let router_host = env::var("ROUTER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let router_port = parse_port("ROUTER_PORT", "9100")?;

        let allowed_networks_str =
            env::var("ALLOWED_NETWORKS").unwrap_or_else(|_| "127.0.0.0/8,::1/128".to_string());

        Ok(Config {
            databases,
            router_host,
            router_port,
            allowed_networks: parse_networks(&allowed_networks_str),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.router_host, self.router_port);
        addr.parse().map_err(|e| RouterError::Config {
            message: format!("Invalid socket address {}: {}", addr, e),
        })
    }
}

/// Use `url_var` if set, otherwise assemble from `{prefix}_HOST`, `{prefix}_PORT`, ...
fn database_url_from_env(url_var: &str, prefix: &str) -> Result<String> {
    if let Ok(url) = env::var(url_var) {
        return Ok(url);
    }

    let var = |suffix: &str, fallback: &str| {
        env::var(format!("{}_{}", prefix, suffix)).unwrap_or_else(|_| fallback.to_string())
    };

    let db_host = var("HOST", "localhost");
    let db_port = parse_port(&format!("{}_PORT", prefix), "5432")?;
    let db_name = var("NAME", "postgres");
    let db_user = var("USER", "postgres");
    let db_password = var("PASSWORD", "password");

    // URL-encode password to handle special characters
    let encoded_password = urlencoding::encode(&db_password);

    Ok(format!(
        "postgres://{}:{}@{}:{}/{}",
        db_user, encoded_password, db_host, db_port, db_name
    ))
}

fn parse_networks(s: &str) -> Vec<IpNetwork> {
    s.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                IpNetwork::from_str(trimmed).ok()
            }
        })
        .collect()
}

fn parse_port(var: &str, fallback: &str) -> Result<u16> {
    let value = env::var(var).unwrap_or_else(|_| fallback.to_string());
    value.trim().parse().map_err(|e| RouterError::Config {
        message: format!("Invalid {} '{}': {}", var, value, e),
    })
}

/// Replace the password in a connection URL so it can be displayed
///
/// Masks both the userinfo password and a `password=` query parameter.
pub fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let (scheme, rest) = url.split_at(scheme_end + 3);

    let authority_end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    let authority = match authority.rfind('@') {
        Some(at) => {
            let credentials = &authority[..at];
            match credentials.find(':') {
                Some(colon) => format!("{}:***{}", &credentials[..colon], &authority[at..]),
                None => authority.to_string(),
            }
        }
        None => authority.to_string(),
    };

    format!("{}{}{}", scheme, authority, redact_query_password(tail))
}

fn redact_query_password(tail: &str) -> String {
    let Some(question) = tail.find('?') else {
        return tail.to_string();
    };
    let (path, query) = tail.split_at(question + 1);

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if key.eq_ignore_ascii_case("password") => format!("{}=***", key),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}{}", path, query)
}
