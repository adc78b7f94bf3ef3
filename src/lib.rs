//! Folio: a portfolio content API with a read-through response cache.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
