use std::path::Path;

use anyhow::{Context, Result};
use certgate_core::db::{connect_to_db, import_seed, Seed};

use crate::config::load_config;

pub(crate) async fn command(
    cli: &crate::Cli,
    certificates: Option<&Path>,
    clients: Option<&Path>,
) -> Result<()> {
    let config = load_config(&cli.config)?;
    let seed_config = config.store.seed.as_ref();

    let certificates = certificates
        .map(Path::to_path_buf)
        .or_else(|| seed_config.map(|x| config.resolve_path(&x.certificates)))
        .context("No certificates file given and none configured under `seed`")?;
    let clients = clients
        .map(Path::to_path_buf)
        .or_else(|| seed_config.map(|x| config.resolve_path(&x.clients)))
        .context("No clients file given and none configured under `seed`")?;

    let seed = Seed::load(&certificates, &clients).context("Could not load seed files")?;

    let db = connect_to_db(&config).await?;
    import_seed(&db, &seed)
        .await
        .context("Could not import seed data")?;
    Ok(())
}
