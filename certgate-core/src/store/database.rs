use std::sync::Arc;

use async_trait::async_trait;
use certgate_common::CertgateError;
use certgate_db_entities::{Certificate, Client};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{CertificateStore, UpdateOutcome};

pub struct DatabaseStore {
    db: Arc<Mutex<DatabaseConnection>>,
}

impl DatabaseStore {
    pub fn new(db: Arc<Mutex<DatabaseConnection>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CertificateStore for DatabaseStore {
    async fn get_client(
        &self,
        client_id: Uuid,
    ) -> Result<Option<certgate_common::Client>, CertgateError> {
        let db = self.db.lock().await;
        Ok(Client::Entity::find_by_id(client_id)
            .one(&*db)
            .await?
            .map(Into::into))
    }

    async fn get_certificate(
        &self,
        certificate_id: Uuid,
    ) -> Result<Option<certgate_common::Certificate>, CertgateError> {
        let db = self.db.lock().await;
        Ok(Certificate::Entity::find_by_id(certificate_id)
            .one(&*db)
            .await?
            .map(Into::into))
    }

    async fn list_certificates(&self) -> Result<Vec<certgate_common::Certificate>, CertgateError> {
        let db = self.db.lock().await;
        Ok(Certificate::Entity::find()
            .all(&*db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn update_client_certificate(
        &self,
        client_id: Uuid,
        certificate_id: Uuid,
    ) -> Result<UpdateOutcome, CertgateError> {
        let db = self.db.lock().await;

        // Single conditional UPDATE so that concurrent writers
        // (possibly other processes) can't interleave with the check
        let result = Client::Entity::update_many()
            .col_expr(Client::Column::CertificateId, Expr::value(certificate_id))
            .filter(Client::Column::Id.eq(client_id))
            .filter(Client::Column::CertificateId.ne(certificate_id))
            .exec(&*db)
            .await?;

        if result.rows_affected > 0 {
            return Ok(UpdateOutcome::Updated);
        }

        Ok(match Client::Entity::find_by_id(client_id).one(&*db).await? {
            Some(_) => UpdateOutcome::Unchanged,
            None => UpdateOutcome::ClientMissing,
        })
    }
}

#[cfg(test)]
mod tests {
    use certgate_db_migrations::migrate_database;
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database};

    use super::*;
    use crate::test_fixtures::*;

    async fn seeded_store() -> DatabaseStore {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.unwrap();
        migrate_database(&db).await.unwrap();

        for certificate in [certificate_27bfe9fc(), certificate_f0e5137f()] {
            Certificate::ActiveModel::from(certificate)
                .insert(&db)
                .await
                .unwrap();
        }
        Client::ActiveModel::from(client())
            .insert(&db)
            .await
            .unwrap();

        DatabaseStore::new(Arc::new(Mutex::new(db)))
    }

    #[tokio::test]
    async fn test_lookups() {
        let store = seeded_store().await;

        assert_eq!(store.get_client(client().id).await.unwrap(), Some(client()));
        assert_eq!(store.get_client(Uuid::new_v4()).await.unwrap(), None);
        assert_eq!(
            store
                .get_certificate(certificate_f0e5137f().id)
                .await
                .unwrap(),
            Some(certificate_f0e5137f())
        );
        assert_eq!(store.get_certificate(Uuid::new_v4()).await.unwrap(), None);

        let mut ids: Vec<_> = store
            .list_certificates()
            .await
            .unwrap()
            .into_iter()
            .map(|x| x.id)
            .collect();
        ids.sort();
        assert_eq!(
            ids,
            vec![certificate_27bfe9fc().id, certificate_f0e5137f().id]
        );
    }

    #[tokio::test]
    async fn test_conditional_update() {
        let store = seeded_store().await;
        let target = certificate_f0e5137f().id;

        assert_eq!(
            store
                .update_client_certificate(client().id, target)
                .await
                .unwrap(),
            UpdateOutcome::Updated
        );
        assert_eq!(
            store
                .get_client(client().id)
                .await
                .unwrap()
                .map(|x| x.certificate_id),
            Some(target)
        );
        assert_eq!(
            store
                .update_client_certificate(client().id, target)
                .await
                .unwrap(),
            UpdateOutcome::Unchanged
        );
        assert_eq!(
            store
                .update_client_certificate(Uuid::new_v4(), target)
                .await
                .unwrap(),
            UpdateOutcome::ClientMissing
        );
    }
}
