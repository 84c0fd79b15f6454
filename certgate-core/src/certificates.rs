use std::sync::Arc;

use certgate_common::{AssignedCertificate, CertgateError, CertificateView};
use tracing::*;
use uuid::Uuid;

use crate::{CertificateStore, UpdateOutcome};

#[derive(Clone)]
pub struct CertificateService {
    store: Arc<dyn CertificateStore>,
}

impl CertificateService {
    pub fn new(store: Arc<dyn CertificateStore>) -> Self {
        Self { store }
    }

    /// All stored certificates, ordered by id.
    ///
    /// A single undecodable certificate fails the whole listing.
    pub async fn list_certificates(&self) -> Result<Vec<CertificateView>, CertgateError> {
        let mut certificates = self.store.list_certificates().await?;
        // Uuid ordering is byte order, which is also the order of the hyphenated form
        certificates.sort_unstable_by_key(|x| x.id);

        certificates
            .iter()
            .map(|certificate| {
                certificate.to_view().inspect_err(|error| {
                    error!(certificate_id = %certificate.id, %error, "Stored certificate is invalid");
                })
            })
            .collect()
    }

    /// Points the client at a different, existing certificate.
    ///
    /// Checks run in a fixed order: client existence, certificate existence,
    /// then the no-op check. Nothing is written unless all of them pass.
    pub async fn assign_certificate(
        &self,
        client_id: Uuid,
        certificate_id: Uuid,
    ) -> Result<AssignedCertificate, CertgateError> {
        let Some(client) = self.store.get_client(client_id).await? else {
            debug!(%client_id, "Client not found");
            return Err(CertgateError::ClientNotFound(client_id));
        };

        let Some(certificate) = self.store.get_certificate(certificate_id).await? else {
            debug!(%client_id, %certificate_id, "Certificate not found");
            return Err(CertgateError::CertificateNotFound(certificate_id));
        };

        if client.certificate_id == certificate_id {
            debug!(%client_id, %certificate_id, "Certificate is already assigned");
            return Err(CertgateError::NoCertificateChange);
        }

        match self
            .store
            .update_client_certificate(client_id, certificate_id)
            .await?
        {
            UpdateOutcome::Updated => (),
            UpdateOutcome::Unchanged => {
                debug!(%client_id, %certificate_id, "Certificate was assigned concurrently");
                return Err(CertgateError::NoCertificateChange);
            }
            UpdateOutcome::ClientMissing => {
                debug!(%client_id, "Client disappeared during assignment");
                return Err(CertgateError::ClientNotFound(client_id));
            }
        }

        info!(
            %client_id,
            %certificate_id,
            previous_certificate_id = %client.certificate_id,
            "Assigned certificate"
        );

        Ok(AssignedCertificate {
            client_id,
            certificate: certificate.to_view()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use certgate_common::{Certificate, Client};

    use super::*;
    use crate::test_fixtures::*;
    use crate::MemoryStore;

    /// Counts writes that reach the inner store
    struct CountingStore {
        inner: MemoryStore,
        updates: AtomicUsize,
    }

    #[async_trait]
    impl CertificateStore for CountingStore {
        async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>, CertgateError> {
            self.inner.get_client(client_id).await
        }

        async fn get_certificate(
            &self,
            certificate_id: Uuid,
        ) -> Result<Option<Certificate>, CertgateError> {
            self.inner.get_certificate(certificate_id).await
        }

        async fn list_certificates(&self) -> Result<Vec<Certificate>, CertgateError> {
            self.inner.list_certificates().await
        }

        async fn update_client_certificate(
            &self,
            client_id: Uuid,
            certificate_id: Uuid,
        ) -> Result<UpdateOutcome, CertgateError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.inner
                .update_client_certificate(client_id, certificate_id)
                .await
        }
    }

    fn setup_with(
        extra_certificates: Vec<Certificate>,
    ) -> (CertificateService, Arc<CountingStore>) {
        let certificates = [certificate_27bfe9fc(), certificate_f0e5137f()]
            .into_iter()
            .chain(extra_certificates);
        let store = Arc::new(CountingStore {
            inner: MemoryStore::from_records(certificates, [client()]),
            updates: AtomicUsize::new(0),
        });
        (CertificateService::new(store.clone()), store)
    }

    fn setup() -> (CertificateService, Arc<CountingStore>) {
        setup_with(vec![])
    }

    #[tokio::test]
    async fn test_assign_certificate() {
        let (service, store) = setup();
        let target = certificate_f0e5137f().id;

        let assigned = service
            .assign_certificate(client().id, target)
            .await
            .unwrap();

        assert_eq!(assigned.client_id, client().id);
        assert_eq!(assigned.certificate.id, target);
        assert_eq!(
            assigned.certificate.serial_number,
            "35:3c:ff:fb:d1:84:6e:ab:7d:82:3c:df:9f:4e:47:52:81:c9:2d:9d"
        );
        assert_eq!(
            store
                .get_client(client().id)
                .await
                .unwrap()
                .map(|x| x.certificate_id),
            Some(target)
        );
        assert_eq!(store.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_assign_certificate_unknown_client() {
        let (service, store) = setup();
        let unknown_client = Uuid::new_v4();

        for certificate_id in [certificate_f0e5137f().id, Uuid::new_v4()] {
            let error = service
                .assign_certificate(unknown_client, certificate_id)
                .await
                .unwrap_err();
            assert!(
                matches!(error, CertgateError::ClientNotFound(id) if id == unknown_client),
                "{error:?}"
            );
        }
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_assign_certificate_unknown_certificate() {
        let (service, store) = setup();
        let unknown_certificate = Uuid::new_v4();

        let error = service
            .assign_certificate(client().id, unknown_certificate)
            .await
            .unwrap_err();
        assert!(
            matches!(error, CertgateError::CertificateNotFound(id) if id == unknown_certificate),
            "{error:?}"
        );
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_assign_same_certificate_is_rejected() {
        let (service, store) = setup();

        let error = service
            .assign_certificate(client().id, client().certificate_id)
            .await
            .unwrap_err();
        assert!(
            matches!(error, CertgateError::NoCertificateChange),
            "{error:?}"
        );
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
        assert_eq!(
            store.get_client(client().id).await.unwrap(),
            Some(client())
        );
    }

    /// Simulates another writer assigning the same certificate between
    /// the read checks and the write
    struct LostRaceStore;

    #[async_trait]
    impl CertificateStore for LostRaceStore {
        async fn get_client(&self, _: Uuid) -> Result<Option<Client>, CertgateError> {
            Ok(Some(client()))
        }

        async fn get_certificate(&self, _: Uuid) -> Result<Option<Certificate>, CertgateError> {
            Ok(Some(certificate_f0e5137f()))
        }

        async fn list_certificates(&self) -> Result<Vec<Certificate>, CertgateError> {
            Ok(vec![])
        }

        async fn update_client_certificate(
            &self,
            _: Uuid,
            _: Uuid,
        ) -> Result<UpdateOutcome, CertgateError> {
            Ok(UpdateOutcome::Unchanged)
        }
    }

    #[tokio::test]
    async fn test_assign_certificate_lost_race() {
        let service = CertificateService::new(Arc::new(LostRaceStore));
        let error = service
            .assign_certificate(client().id, certificate_f0e5137f().id)
            .await
            .unwrap_err();
        assert!(
            matches!(error, CertgateError::NoCertificateChange),
            "{error:?}"
        );
    }

    #[tokio::test]
    async fn test_list_certificates_is_ordered_and_stable() {
        // Ids on both sides of the fixtures
        let (service, _) = setup_with(
            [
                "ffffffff-0000-4000-8000-000000000000",
                "00000000-ffff-4000-8000-000000000000",
            ]
            .map(|id| Certificate::new(Uuid::parse_str(id).unwrap(), CERTIFICATE_27BFE9FC))
            .to_vec(),
        );

        let first = service.list_certificates().await.unwrap();
        let second = service.list_certificates().await.unwrap();
        assert_eq!(first, second);

        let ids: Vec<String> = first.iter().map(|x| x.id.to_string()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(
            ids,
            vec![
                "00000000-ffff-4000-8000-000000000000",
                "27bfe9fc-b80b-46a1-a967-78658db0aeec",
                "f0e5137f-03e1-4ca9-8dd9-b79da983d6be",
                "ffffffff-0000-4000-8000-000000000000",
            ]
        );
        assert_eq!(
            first[1].serial_number,
            "5b:19:ff:73:a8:d9:d2:56:cd:fe:8b:07:cf:29:eb:5b:4d:53:b6:30"
        );
    }

    #[tokio::test]
    async fn test_list_certificates_fails_on_invalid_certificate() {
        let broken = Uuid::new_v4();
        let (service, _) = setup_with(vec![Certificate::new(
            broken,
            "-----BEGIN CERTIFICATE-----\naGVsbG8=\n-----END CERTIFICATE-----",
        )]);

        let error = service.list_certificates().await.unwrap_err();
        assert!(
            matches!(error, CertgateError::InvalidCertificate { id, .. } if id == broken),
            "{error:?}"
        );
    }
}
