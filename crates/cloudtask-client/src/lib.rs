/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public CloudTask client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AuthGateway,
    FileTokenStore,
    MemoryTokenStore,
    Session,
    SessionContext,
    TokenStore,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    CloudTaskClient,
    CloudTaskError,
    DEFAULT_BASE_URL,
    ErrorKind,
    Result,
};

// Re-export all types
pub use types::*;
