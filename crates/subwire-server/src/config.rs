use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use subwire_gateway::ReplacePolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: PathBuf,
    pub replace_policy: ReplacePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Bare IP, v4 or v6; `SocketAddr::new` adds the brackets for v6.
        let host: IpAddr = lookup("SUBWIRE_HOST")
            .unwrap_or_else(|| "0.0.0.0".into())
            .parse()
            .context("SUBWIRE_HOST must be an IP address")?;
        let port: u16 = lookup("SUBWIRE_PORT")
            .unwrap_or_else(|| "8000".into())
            .parse()
            .context("SUBWIRE_PORT must be a port number")?;
        let db_path: PathBuf = lookup("SUBWIRE_DB_PATH")
            .unwrap_or_else(|| "subwire.db".into())
            .into();
        let replace_policy = match lookup("SUBWIRE_CLOSE_REPLACED").as_deref() {
            Some("1") | Some("true") | Some("yes") => ReplacePolicy::Close,
            _ => ReplacePolicy::Keep,
        };

        Ok(Self {
            host,
            port,
            db_path,
            replace_policy,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
