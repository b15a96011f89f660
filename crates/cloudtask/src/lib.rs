/*
[INPUT]:  Public API exports for the cloudtask crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod app;
pub mod config;

// Re-export main types for convenience
pub use app::{App, DashboardPage, LoginPage, Navigator, RegisterPage, Route};
pub use config::{AppConfig, RedirectPolicy};
