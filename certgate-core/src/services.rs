use std::sync::Arc;

use anyhow::Result;
use certgate_common::CertgateConfig;
use tokio::sync::Mutex;

use crate::db::{connect_to_db, populate_db};
use crate::{CertificateService, DatabaseStore};

#[derive(Clone)]
pub struct Services {
    pub certificates: CertificateService,
}

impl Services {
    /// Connects to the configured database, migrates it and imports the seed if it is empty
    pub async fn new(config: &CertgateConfig) -> Result<Self> {
        let db = connect_to_db(config).await?;
        populate_db(&db, config).await?;

        let store = Arc::new(DatabaseStore::new(Arc::new(Mutex::new(db))));

        Ok(Self {
            certificates: CertificateService::new(store),
        })
    }
}
