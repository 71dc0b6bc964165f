use anyhow::{Context, Result};
use dotenv::dotenv;
use rocket::figment::Figment;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "WEBSHARE_";

const MIB: u64 = 1024 * 1024;

/// Runtime settings, read from `WEBSHARE_*` environment variables (a `.env` file is
/// honoured). Every field has a default so the server runs with no configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShareConfig {
    pub address: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub index_path: PathBuf,
    /// Hard cap on a single upload, in MiB.
    pub upload_limit_mib: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            upload_dir: PathBuf::from("./uploads"),
            index_path: PathBuf::from("./index.html"),
            upload_limit_mib: 4096,
        }
    }
}

impl ShareConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .context("Failed to read WEBSHARE_* environment variables")
    }

    #[cfg(test)]
    fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(pairs)?)
    }

    pub fn upload_limit_bytes(&self) -> u64 {
        self.upload_limit_mib.saturating_mul(MIB)
    }

    /// Rocket configuration derived from these settings. Anything not set here still
    /// comes from `Rocket.toml` / `ROCKET_*`.
    pub fn figment(&self) -> Figment {
        let limit = self.upload_limit_bytes();
        rocket::Config::figment()
            .merge(("address", self.address))
            .merge(("port", self.port))
            .merge(("limits.file", limit))
            .merge(("limits.data-form", limit))
    }
}
