//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → handlers.rs (probe handlers, metrics per answer)
//!     → HealthEndpoint payload as JSON
//! ```

pub mod handlers;
pub mod server;

pub use server::HttpServer;
