use x509_parser::error::{PEMError, X509Error};

#[derive(thiserror::Error, Debug)]
pub enum CaError {
    /// No PEM envelope found, or its body is not valid base64
    #[error("PEM: {0}")]
    Decode(#[from] x509_parser::asn1_rs::Err<PEMError>),
    /// The envelope decoded, but its contents are not exactly one certificate
    #[error("ASN.1 X509: {0}")]
    Parse(#[from] x509_parser::asn1_rs::Err<X509Error>),
}

impl CaError {
    /// Whether the payload had no usable envelope at all,
    /// as opposed to an envelope around a malformed certificate.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
