//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → [routing compiles the table into axum routes]
//!     → dispatch.rs (operation → resource handler)
//!     → error.rs (ApiError → {"error": ...})
//!     → Send to client
//! ```

pub mod dispatch;
pub mod error;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
