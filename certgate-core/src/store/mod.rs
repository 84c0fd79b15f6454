mod database;
mod memory;

use async_trait::async_trait;
use certgate_common::{CertgateError, Certificate, Client};
pub use database::DatabaseStore;
pub use memory::MemoryStore;
use uuid::Uuid;

/// Result of a conditional client certificate update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// The client already pointed at the target certificate
    Unchanged,
    ClientMissing,
}

/// Persistence for certificates and clients
#[async_trait]
pub trait CertificateStore: Send + Sync {
    async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>, CertgateError>;

    async fn get_certificate(
        &self,
        certificate_id: Uuid,
    ) -> Result<Option<Certificate>, CertgateError>;

    /// In no particular order
    async fn list_certificates(&self) -> Result<Vec<Certificate>, CertgateError>;

    /// Atomically points the client at `certificate_id`, but only if it
    /// currently points somewhere else.
    async fn update_client_certificate(
        &self,
        client_id: Uuid,
        certificate_id: Uuid,
    ) -> Result<UpdateOutcome, CertgateError>;
}
