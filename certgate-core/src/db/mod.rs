use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use certgate_common::{CertgateConfig, CertgateError, Certificate, Client};
use certgate_db_entities::{Certificate as CertificateEntity, Client as ClientEntity};
use certgate_db_migrations::migrate_database;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    TransactionTrait,
};
use tracing::*;

pub async fn connect_to_db(config: &CertgateConfig) -> Result<DatabaseConnection> {
    let mut url = url::Url::parse(&config.store.database_url.expose_secret()[..])?;
    if url.scheme() == "sqlite" {
        let mut abs_path = config.resolve_path(url.path());
        abs_path.push("db.sqlite3");

        if let Some(parent) = abs_path.parent() {
            std::fs::create_dir_all(parent)?
        }

        url.set_path(
            abs_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Failed to convert database path to string"))?,
        );

        url.set_query(Some("mode=rwc"));

        let db = Database::connect(ConnectOptions::new(url.to_string())).await?;
        db.begin().await?.commit().await?;
        drop(db);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&abs_path, std::fs::Permissions::from_mode(0o600))?;
        }
    }

    let mut opt = ConnectOptions::new(url.to_string());
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);

    let connection = Database::connect(opt).await?;

    migrate_database(&connection).await?;
    Ok(connection)
}

/// Certificates and clients loaded from JSON fixture files
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub certificates: Vec<Certificate>,
    pub clients: Vec<Client>,
}

impl Seed {
    pub fn from_json(certificates: &str, clients: &str) -> Result<Self, CertgateError> {
        let mut certificates: Vec<Certificate> = serde_json::from_str(certificates)?;
        for certificate in certificates.iter_mut() {
            certificate.certificate_pem_encoded =
                certificate.certificate_pem_encoded.trim().to_owned();
        }

        Ok(Self {
            certificates,
            clients: serde_json::from_str(clients)?,
        })
    }

    pub fn load(certificates_path: &Path, clients_path: &Path) -> Result<Self, CertgateError> {
        Self::from_json(
            &std::fs::read_to_string(certificates_path)?,
            &std::fs::read_to_string(clients_path)?,
        )
    }

    /// Rejects certificates that don't decode, and warns about clients
    /// referring to certificates the seed doesn't contain
    pub fn validate(&self) -> Result<(), CertgateError> {
        for certificate in &self.certificates {
            certificate.to_view()?;
        }
        for client in &self.clients {
            if !self
                .certificates
                .iter()
                .any(|x| x.id == client.certificate_id)
            {
                warn!(
                    client_id = %client.id,
                    certificate_id = %client.certificate_id,
                    "Client refers to a certificate that is not part of the seed"
                );
            }
        }
        Ok(())
    }
}

/// Upserts the seed records in a single transaction
pub async fn import_seed(db: &DatabaseConnection, seed: &Seed) -> Result<(), CertgateError> {
    seed.validate()?;

    let txn = db.begin().await?;
    for certificate in &seed.certificates {
        CertificateEntity::Entity::insert(CertificateEntity::ActiveModel::from(
            certificate.clone(),
        ))
        .on_conflict(
            OnConflict::column(CertificateEntity::Column::Id)
                .update_column(CertificateEntity::Column::CertificatePemEncoded)
                .to_owned(),
        )
        .exec(&txn)
        .await?;
    }
    for client in &seed.clients {
        ClientEntity::Entity::insert(ClientEntity::ActiveModel::from(client.clone()))
            .on_conflict(
                OnConflict::column(ClientEntity::Column::Id)
                    .update_column(ClientEntity::Column::CertificateId)
                    .to_owned(),
            )
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    info!(
        certificates = seed.certificates.len(),
        clients = seed.clients.len(),
        "Imported seed data"
    );
    Ok(())
}

async fn is_empty<C: ConnectionTrait>(db: &C) -> Result<bool, CertgateError> {
    Ok(CertificateEntity::Entity::find().count(db).await? == 0
        && ClientEntity::Entity::find().count(db).await? == 0)
}

/// Imports the configured seed files if the database has no records yet
pub async fn populate_db(
    db: &DatabaseConnection,
    config: &CertgateConfig,
) -> Result<(), CertgateError> {
    let Some(seed_config) = &config.store.seed else {
        return Ok(());
    };

    if !is_empty(db).await? {
        debug!("Database already populated, skipping seed import");
        return Ok(());
    }

    let seed = Seed::load(
        &config.resolve_path(&seed_config.certificates),
        &config.resolve_path(&seed_config.clients),
    )?;
    import_seed(db, &seed).await
}
