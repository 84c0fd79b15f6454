use poem_openapi::OpenApi;

pub mod certificates;

pub fn get() -> impl OpenApi {
    certificates::Api
}
