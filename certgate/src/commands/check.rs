use anyhow::{Context, Result};
use certgate_core::db::Seed;
use tracing::*;

use crate::config::load_config;

pub(crate) async fn command(cli: &crate::Cli) -> Result<()> {
    let config = load_config(&cli.config)?;

    if let Some(seed_config) = &config.store.seed {
        let seed = Seed::load(
            &config.resolve_path(&seed_config.certificates),
            &config.resolve_path(&seed_config.clients),
        )
        .context("Could not load seed files")?;
        seed.validate().context("Invalid seed data")?;
        info!(
            certificates = seed.certificates.len(),
            clients = seed.clients.len(),
            "Seed files are valid"
        );
    }

    info!("No problems found");
    Ok(())
}
