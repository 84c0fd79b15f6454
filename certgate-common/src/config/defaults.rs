use std::net::{Ipv4Addr, SocketAddr};

use crate::Secret;

#[inline]
pub(crate) fn _default_database_url() -> Secret<String> {
    Secret::new("sqlite:data/db".to_owned())
}

#[inline]
pub(crate) fn _default_http_listen() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8888))
}
