mod config;
mod data;
mod error;
mod secret;

pub use config::*;
pub use data::*;
pub use error::CertgateError;
pub use secret::Secret;
