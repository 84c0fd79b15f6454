use certgate_common::{AssignedCertificate, CertgateError, CertificateView};
use certgate_core::CertificateService;
use poem::http::StatusCode;
use poem::web::Data;
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object, OpenApi};
use uuid::Uuid;

pub struct Api;

#[derive(Object)]
struct CertificateList {
    certificates: Vec<CertificateView>,
}

#[derive(Object)]
struct UpdateCertificateRequest {
    client_id: Uuid,
    certificate_id: Uuid,
}

#[derive(Object)]
struct ApiError {
    code: u16,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: &str) -> Json<Self> {
        Json(Self {
            code: status.as_u16(),
            message: message.into(),
        })
    }
}

#[derive(ApiResponse)]
enum GetCertificatesResponse {
    #[oai(status = 200)]
    Ok(Json<CertificateList>),
}

#[derive(ApiResponse)]
enum UpdateCertificateResponse {
    #[oai(status = 200)]
    Ok(Json<AssignedCertificate>),
    #[oai(status = 400)]
    BadRequest(Json<ApiError>),
    #[oai(status = 404)]
    NotFound(Json<ApiError>),
}

#[OpenApi]
impl Api {
    #[oai(path = "/certificates", method = "get", operation_id = "get_certificates")]
    async fn api_get_certificates(
        &self,
        certificates: Data<&CertificateService>,
    ) -> poem::Result<GetCertificatesResponse> {
        Ok(GetCertificatesResponse::Ok(Json(CertificateList {
            certificates: certificates.list_certificates().await?,
        })))
    }

    #[oai(path = "/certificates", method = "post", operation_id = "update_certificate")]
    async fn api_update_certificate(
        &self,
        certificates: Data<&CertificateService>,
        body: Json<UpdateCertificateRequest>,
    ) -> poem::Result<UpdateCertificateResponse> {
        match certificates
            .assign_certificate(body.client_id, body.certificate_id)
            .await
        {
            Ok(assigned) => Ok(UpdateCertificateResponse::Ok(Json(assigned))),
            Err(CertgateError::ClientNotFound(_)) => Ok(UpdateCertificateResponse::NotFound(
                ApiError::new(StatusCode::NOT_FOUND, "client not found"),
            )),
            Err(CertgateError::CertificateNotFound(_)) => {
                Ok(UpdateCertificateResponse::NotFound(ApiError::new(
                    StatusCode::NOT_FOUND,
                    "certificate not found",
                )))
            }
            Err(error @ CertgateError::NoCertificateChange) => {
                Ok(UpdateCertificateResponse::BadRequest(ApiError::new(
                    StatusCode::BAD_REQUEST,
                    &error.to_string(),
                )))
            }
            Err(error) => Err(error.into()),
        }
    }
}
