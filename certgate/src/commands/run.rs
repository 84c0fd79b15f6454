use anyhow::Result;
use certgate_admin::AdminServer;
use certgate_core::Services;
use tracing::*;

use crate::config::load_config;

pub(crate) async fn command(cli: &crate::Cli) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    info!(%version, "Certgate");

    let config = load_config(&cli.config)?;
    let listen = config.store.http.listen;
    let services = Services::new(&config).await?;

    let admin = AdminServer::new(&services).run(listen);

    if console::user_attended() {
        info!("--------------------------------------------");
        info!("Certgate is now running.");
        info!("Accepting API requests on http://{listen}/api/v1");
        info!("--------------------------------------------");
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt");
        }
        result = admin => {
            if let Err(error) = result {
                error!(?error, "Server error");
                return Err(error);
            }
        }
    }

    info!("Exiting");
    Ok(())
}
