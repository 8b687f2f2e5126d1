//! `margin-client`
//!
//! **Responsibility:** the product repository boundary.
//!
//! This crate provides:
//! - the [`ProductRepository`] trait every controller talks to
//! - an HTTP implementation against the product backend
//! - an in-memory implementation for development and tests
//! - client configuration (base URL, timeout) from the environment
//!
//! The backend remains the authority; nothing here caches or persists.

pub mod config;
pub mod http;
pub mod in_memory;
pub mod repository;

pub use config::ClientConfig;
pub use http::HttpProductRepository;
pub use in_memory::InMemoryProductRepository;
pub use repository::{ProductRepository, RepositoryError, RepositoryResult};
