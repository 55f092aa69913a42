//! Shared fetch, translate, merge and shuffle pipeline behind every listing
//! endpoint. Resource modules only pick a [`repository::Collection`] and the
//! request parameters.

pub mod repository;
pub mod service;

#[cfg(test)]
pub mod memory;
