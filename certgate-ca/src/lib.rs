use data_encoding::HEXLOWER;
use time::Date;
use x509_parser::error::X509Error;
use x509_parser::nom;
use x509_parser::num_bigint::BigUint;
use x509_parser::parse_x509_certificate;
use x509_parser::pem::parse_x509_pem;

mod error;
pub use error::CaError;

/// The fields of a leaf certificate that Certgate surfaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDetails {
    pub serial_number: BigUint,
    /// Start of the validity window, UTC calendar date
    pub not_before: Date,
    /// End of the validity window, UTC calendar date
    pub not_after: Date,
}

impl CertificateDetails {
    pub fn formatted_serial_number(&self) -> String {
        format_serial_number(&self.serial_number)
    }

    pub fn validity_dates(&self) -> (Date, Date) {
        (self.not_before, self.not_after)
    }
}

/// Decode a single PEM-wrapped DER certificate.
///
/// Surrounding whitespace is ignored. Anything else after the certificate,
/// inside the envelope or after it, is a parse error.
pub fn decode_certificate(payload: &[u8]) -> Result<CertificateDetails, CaError> {
    let (after_envelope, pem) = parse_x509_pem(payload.trim_ascii())?;
    if !after_envelope.trim_ascii().is_empty() {
        return Err(invalid_certificate());
    }

    let (rest, certificate) = parse_x509_certificate(&pem.contents)?;
    if !rest.is_empty() {
        return Err(invalid_certificate());
    }

    let validity = certificate.validity();
    Ok(CertificateDetails {
        serial_number: certificate.serial.clone(),
        not_before: validity.not_before.to_datetime().date(),
        not_after: validity.not_after.to_datetime().date(),
    })
}

fn invalid_certificate() -> CaError {
    CaError::Parse(nom::Err::Error(X509Error::InvalidCertificate))
}

/// Render a serial number as colon-separated lower-case hex byte pairs,
/// e.g. `35:3c:ff:fb`. Zero renders as `00`.
pub fn format_serial_number(serial: &BigUint) -> String {
    // to_bytes_be() is minimal and yields [0] for zero
    serial
        .to_bytes_be()
        .chunks(1)
        .map(|byte| HEXLOWER.encode(byte))
        .collect::<Vec<_>>()
        .join(":")
}
