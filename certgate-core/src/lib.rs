mod certificates;
pub mod db;
mod services;
mod store;

pub use certificates::CertificateService;
pub use services::Services;
pub use store::{CertificateStore, DatabaseStore, MemoryStore, UpdateOutcome};
