use std::{net, path::PathBuf, time};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    pub storage: Storage,
    pub http: Http,
    #[serde(default)]
    pub latency: Latency,
}

#[derive(Deserialize)]
pub struct Storage {
    #[serde(default = "default_storage_key")]
    pub key: String,
    pub medium: Medium,
}

fn default_storage_key() -> String {
    crate::store::STORAGE_KEY.to_owned()
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Medium {
    Memory,
    File { dir: PathBuf },
}

#[derive(Deserialize)]
pub struct Http {
    pub server: Server,
    pub cors: Cors,
}

#[derive(Deserialize)]
pub struct Server {
    pub addr: net::SocketAddr,
}

#[derive(Deserialize)]
pub struct Cors {
    pub allowed_origins: Vec<String>,
}

/// Artificial delay applied before each store operation.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Latency {
    #[serde(with = "humantime_serde")]
    pub list: time::Duration,
    #[serde(with = "humantime_serde")]
    pub get: time::Duration,
    #[serde(with = "humantime_serde")]
    pub create: time::Duration,
    #[serde(with = "humantime_serde")]
    pub update_status: time::Duration,
}
