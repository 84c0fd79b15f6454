use certgate_ca::CaError;
use poem::error::ResponseError;
use poem::http::StatusCode;
use uuid::Uuid;

#[derive(thiserror::Error, Debug)]
pub enum CertgateError {
    #[error("database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),
    #[error("client {0} not found")]
    ClientNotFound(Uuid),
    #[error("certificate {0} not found")]
    CertificateNotFound(Uuid),
    #[error("current certificate matches existing certificate")]
    NoCertificateChange,
    #[error("stored certificate {id} is invalid: {source}")]
    InvalidCertificate {
        id: Uuid,
        #[source]
        source: CaError,
    },
    #[error("deserialization failed: {0}")]
    DeserializeJson(#[from] serde_json::Error),
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl ResponseError for CertgateError {
    fn status(&self) -> StatusCode {
        match self {
            Self::ClientNotFound(_) | Self::CertificateNotFound(_) => StatusCode::NOT_FOUND,
            Self::NoCertificateChange => StatusCode::BAD_REQUEST,
            Self::InvalidCertificate { .. }
            | Self::DatabaseError(_)
            | Self::DeserializeJson(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
