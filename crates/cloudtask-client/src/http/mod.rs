/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod error;
pub mod public;
pub mod tasks;

pub use error::{CloudTaskError, ErrorKind, Result};

pub use client::{ClientConfig, CloudTaskClient, DEFAULT_BASE_URL};
