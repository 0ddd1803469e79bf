//! Dog house listings and their reviews over a small REST API.
//!
//! Reviews are reachable both nested under their dog house
//! (`/dog_houses/:dog_house_id/reviews`) and at the top level (`/reviews`).

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resources;
pub mod routing;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{MemoryStore, Store};
