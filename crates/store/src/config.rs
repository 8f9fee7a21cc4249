//! Database connection settings, loaded once at startup.

use crate::error::{StoreError, StoreResult};

/// Connection settings for the watchlist/audit database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl DbConfig {
    /// Read `DBHOST`, `DBPORT`, `DBUSER`, `DBPASS` and `DBNAME` from
    /// the environment. All five are required; a missing one is a
    /// startup-fatal [`StoreError::Config`].
    pub fn from_env() -> StoreResult<Self> {
        let port_raw = require("DBPORT")?;
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| StoreError::Config(format!("DBPORT is not a port number: {port_raw}")))?;

        Ok(Self {
            host: require("DBHOST")?,
            port,
            user: require("DBUSER")?,
            password: require("DBPASS")?,
            dbname: require("DBNAME")?,
        })
    }

    /// Keyword/value connection string for tokio-postgres.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={}",
            self.host, self.port, self.user, self.password, self.dbname
        )
    }
}

fn require(key: &str) -> StoreResult<String> {
    std::env::var(key)
        .map_err(|_| StoreError::Config(format!("missing required environment variable {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_string() {
        let config = DbConfig {
            host: "db.internal".to_string(),
            port: 5432,
            user: "screener".to_string(),
            password: "secret".to_string(),
            dbname: "watchlists".to_string(),
        };
        assert_eq!(
            config.connection_string(),
            "host=db.internal port=5432 user=screener password=secret dbname=watchlists"
        );
    }
}
