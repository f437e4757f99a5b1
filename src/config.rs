use std::net::IpAddr;
use std::time::Duration;

use crate::membership::mutator::MutationPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub db_max_connections: u32,
    pub operation_timeout: Duration,
    pub approval_capacity: ApprovalCapacity,
    pub member_mutation: MutationPolicy,
    pub log_level: String,
}

/// Whether approving a join request consumes one of the project's open positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalCapacity {
    /// Open positions only gate direct self-join.
    Untouched,
    /// Approval requires a free slot and decrements it.
    Consume,
}

impl std::str::FromStr for ApprovalCapacity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "untouched" => Ok(ApprovalCapacity::Untouched),
            "consume" => Ok(ApprovalCapacity::Consume),
            other => Err(format!(
                "Invalid TEAMROSTER_APPROVAL_CAPACITY '{other}': expected 'untouched' or 'consume'"
            )),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("TEAMROSTER_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid TEAMROSTER_HOST: {e}"))?;

        let port: u16 = env_or("TEAMROSTER_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid TEAMROSTER_PORT: {e}"))?;

        let db_max_connections: u32 = env_or("TEAMROSTER_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid TEAMROSTER_DB_MAX_CONNECTIONS: {e}"))?;

        let timeout_ms: u64 = env_or("TEAMROSTER_OPERATION_TIMEOUT_MS", "5000")
            .parse()
            .map_err(|e| format!("Invalid TEAMROSTER_OPERATION_TIMEOUT_MS: {e}"))?;
        if timeout_ms == 0 {
            return Err("TEAMROSTER_OPERATION_TIMEOUT_MS must be greater than zero".to_string());
        }

        let approval_capacity = env_or("TEAMROSTER_APPROVAL_CAPACITY", "untouched").parse()?;
        let member_mutation = env_or("TEAMROSTER_MEMBER_MUTATION", "unrestricted").parse()?;

        let log_level = env_or("TEAMROSTER_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            db_max_connections,
            operation_timeout: Duration::from_millis(timeout_ms),
            approval_capacity,
            member_mutation,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
