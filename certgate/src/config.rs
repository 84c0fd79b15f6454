use std::path::Path;

use anyhow::{Context, Result};
use certgate_common::{CertgateConfig, CertgateConfigStore};
use config::{Config, Environment, File};
use tracing::*;

pub fn load_config(path: &Path) -> Result<CertgateConfig> {
    let store: CertgateConfigStore = Config::builder()
        .add_source(File::from(path))
        .add_source(
            Environment::with_prefix("CERTGATE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Could not load config")?
        .try_deserialize()
        .context("Could not parse config")?;

    let config = CertgateConfig {
        store,
        paths_relative_to: path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    info!(
        "Using config: {path:?} (listen: {}, seed: {})",
        config.store.http.listen,
        config.store.seed.is_some(),
    );
    Ok(config)
}
