#![allow(non_snake_case)]

pub mod Certificate;
pub mod Client;
