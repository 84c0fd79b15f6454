use std::collections::HashMap;

use async_trait::async_trait;
use certgate_common::{CertgateError, Certificate, Client};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{CertificateStore, UpdateOutcome};
use crate::db::Seed;

pub struct MemoryStore {
    certificates: Mutex<HashMap<Uuid, Certificate>>,
    clients: Mutex<HashMap<Uuid, Client>>,
}

impl MemoryStore {
    pub fn from_records(
        certificates: impl IntoIterator<Item = Certificate>,
        clients: impl IntoIterator<Item = Client>,
    ) -> Self {
        Self {
            certificates: Mutex::new(certificates.into_iter().map(|x| (x.id, x)).collect()),
            clients: Mutex::new(clients.into_iter().map(|x| (x.id, x)).collect()),
        }
    }

    pub fn from_seed(seed: &Seed) -> Self {
        Self::from_records(seed.certificates.clone(), seed.clients.clone())
    }

}

#[async_trait]
impl CertificateStore for MemoryStore {
    async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>, CertgateError> {
        Ok(self.clients.lock().await.get(&client_id).cloned())
    }

    async fn get_certificate(
        &self,
        certificate_id: Uuid,
    ) -> Result<Option<Certificate>, CertgateError> {
        Ok(self.certificates.lock().await.get(&certificate_id).cloned())
    }

    async fn list_certificates(&self) -> Result<Vec<Certificate>, CertgateError> {
        Ok(self.certificates.lock().await.values().cloned().collect())
    }

    async fn update_client_certificate(
        &self,
        client_id: Uuid,
        certificate_id: Uuid,
    ) -> Result<UpdateOutcome, CertgateError> {
        let mut clients = self.clients.lock().await;
        let Some(client) = clients.get_mut(&client_id) else {
            return Ok(UpdateOutcome::ClientMissing);
        };
        if client.certificate_id == certificate_id {
            return Ok(UpdateOutcome::Unchanged);
        }
        client.certificate_id = certificate_id;
        Ok(UpdateOutcome::Updated)
    }
}
