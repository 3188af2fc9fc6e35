//! Configuration for teamwork services.
//!
//! ```rust
//! use teamwork::config::{InvitationConfig, TeamworkConfig};
//! use chrono::Duration;
//!
//! // Use defaults
//! let config = TeamworkConfig::default();
//! assert_eq!(config.invitations.ttl, Duration::hours(24));
//!
//! // Or customize
//! let config = TeamworkConfig {
//!     invitations: InvitationConfig {
//!         ttl: Duration::hours(48),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! ```

use std::env;

use chrono::Duration;

use crate::TeamError;

/// Top-level configuration.
#[derive(Debug, Clone, Default)]
pub struct TeamworkConfig {
    /// Invitation record lifetime and pruning.
    pub invitations: InvitationConfig,

    /// Access-token lifetime.
    pub tokens: TokenConfig,

    /// HTTP server settings used by the demo servers.
    pub server: ServerConfig,
}

impl TeamworkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short-lived invitations and frequent pruning, handy when poking at
    /// a local server.
    pub fn development() -> Self {
        Self {
            invitations: InvitationConfig {
                ttl: Duration::minutes(10),
                prune_interval: std::time::Duration::from_secs(30),
            },
            tokens: TokenConfig {
                access_token_expiry: Duration::days(30),
            },
            server: ServerConfig::default(),
        }
    }

    /// Builds a configuration from the process environment, falling back to
    /// defaults for unset variables.
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `DATABASE_URL` | `sqlx` connection string |
    /// | `TEAMWORK_BIND_ADDR` | listen address, e.g. `0.0.0.0:8000` |
    /// | `TEAMWORK_INVITATION_TTL_HOURS` | invitation lifetime in hours |
    /// | `TEAMWORK_PRUNE_INTERVAL_SECS` | seconds between expired-invitation sweeps |
    pub fn from_env() -> Result<Self, TeamError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, TeamError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("DATABASE_URL") {
            config.server.database_url = url;
        }
        if let Some(addr) = lookup("TEAMWORK_BIND_ADDR") {
            config.server.bind_addr = addr;
        }
        if let Some(hours) = lookup("TEAMWORK_INVITATION_TTL_HOURS") {
            let hours: i64 = parse_var("TEAMWORK_INVITATION_TTL_HOURS", &hours)?;
            if hours <= 0 {
                return Err(TeamError::Internal(
                    "TEAMWORK_INVITATION_TTL_HOURS must be positive".to_owned(),
                ));
            }
            config.invitations.ttl = Duration::hours(hours);
        }
        if let Some(secs) = lookup("TEAMWORK_PRUNE_INTERVAL_SECS") {
            let secs: u64 = parse_var("TEAMWORK_PRUNE_INTERVAL_SECS", &secs)?;
            config.invitations.prune_interval = std::time::Duration::from_secs(secs.max(1));
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, TeamError> {
    value
        .trim()
        .parse()
        .map_err(|_| TeamError::Internal(format!("invalid value for {key}: \"{value}\"")))
}

/// Invitation receipt settings.
#[derive(Debug, Clone)]
pub struct InvitationConfig {
    /// How long an invitation record stays listed after it is written.
    ///
    /// Default: 24 hours
    pub ttl: Duration,

    /// How often a server sweeps expired invitation records.
    ///
    /// Default: 10 minutes
    pub prune_interval: std::time::Duration,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(24),
            prune_interval: std::time::Duration::from_secs(600),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Default: 7 days
    pub access_token_expiry: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_expiry: Duration::days(7),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Default: `127.0.0.1:8000`
    pub bind_addr: String,

    /// Default: in-memory `SQLite`
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_owned(),
            database_url: "sqlite::memory:".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TeamworkConfig::default();

        assert_eq!(config.invitations.ttl, Duration::hours(24));
        assert_eq!(
            config.invitations.prune_interval,
            std::time::Duration::from_secs(600)
        );
        assert_eq!(config.tokens.access_token_expiry, Duration::days(7));
        assert_eq!(config.server.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.server.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_development_config() {
        let config = TeamworkConfig::development();
        assert_eq!(config.invitations.ttl, Duration::minutes(10));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = TeamworkConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://teams.db"),
            ("TEAMWORK_BIND_ADDR", "0.0.0.0:9000"),
            ("TEAMWORK_INVITATION_TTL_HOURS", "48"),
            ("TEAMWORK_PRUNE_INTERVAL_SECS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.server.database_url, "sqlite://teams.db");
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.invitations.ttl, Duration::hours(48));
        assert_eq!(
            config.invitations.prune_interval,
            std::time::Duration::from_secs(1)
        );
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let result =
            TeamworkConfig::from_lookup(lookup_from(&[("TEAMWORK_INVITATION_TTL_HOURS", "soon")]));
        assert!(matches!(result, Err(TeamError::Internal(_))));

        let result =
            TeamworkConfig::from_lookup(lookup_from(&[("TEAMWORK_INVITATION_TTL_HOURS", "-1")]));
        assert!(matches!(result, Err(TeamError::Internal(_))));
    }
}
