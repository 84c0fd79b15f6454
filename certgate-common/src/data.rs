use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::CertgateError;

/// A stored certificate. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(rename = "certificate_id")]
    pub id: Uuid,
    pub certificate_pem_encoded: String,
}

/// A client and the certificate currently assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "client_id")]
    pub id: Uuid,
    pub certificate_id: Uuid,
}

/// Display-ready projection of a stored certificate, recomputed on every read
#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct CertificateView {
    pub id: Uuid,
    pub not_before: Date,
    pub not_after: Date,
    pub serial_number: String,
    pub certificate_pem_encoded: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct AssignedCertificate {
    pub client_id: Uuid,
    pub certificate: CertificateView,
}

impl Certificate {
    pub fn new(id: Uuid, certificate_pem_encoded: impl Into<String>) -> Self {
        Self {
            id,
            certificate_pem_encoded: certificate_pem_encoded.into(),
        }
    }

    pub fn to_view(&self) -> Result<CertificateView, CertgateError> {
        let details = certgate_ca::decode_certificate(self.certificate_pem_encoded.as_bytes())
            .map_err(|source| CertgateError::InvalidCertificate {
                id: self.id,
                source,
            })?;

        Ok(CertificateView {
            id: self.id,
            not_before: details.not_before,
            not_after: details.not_after,
            serial_number: details.formatted_serial_number(),
            certificate_pem_encoded: self.certificate_pem_encoded.clone(),
        })
    }
}
