//! Generation backend integration for studybuddy.
//!
//! Implements the `GenerationService` trait over HTTP, attaching the bearer
//! credential issued by the identity service to every request.

pub mod backend;
pub mod config;
pub mod error;
pub mod mock;

pub use backend::BackendService;
pub use config::{create_service, load_config, ClientConfig, Credential};
pub use error::ClientError;
