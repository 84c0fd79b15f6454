mod defaults;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use defaults::*;
use serde::{Deserialize, Serialize};

use crate::Secret;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "_default_http_listen")]
    pub listen: SocketAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: _default_http_listen(),
        }
    }
}

/// JSON fixtures imported into an empty database on startup
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeedConfig {
    pub certificates: PathBuf,
    pub clients: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CertgateConfigStore {
    #[serde(default = "_default_database_url")]
    pub database_url: Secret<String>,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub seed: Option<SeedConfig>,
}

impl Default for CertgateConfigStore {
    fn default() -> Self {
        Self {
            database_url: _default_database_url(),
            http: <_>::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CertgateConfig {
    pub store: CertgateConfigStore,
    pub paths_relative_to: PathBuf,
}

impl CertgateConfig {
    /// Resolves `path` against the config file's directory unless it is absolute
    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.paths_relative_to.join(path)
    }
}
