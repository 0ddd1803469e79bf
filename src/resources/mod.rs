//! Resource handlers.
//!
//! # Data Flow
//! ```text
//! http::dispatch (operation + bound params)
//!     → dog_houses.rs / reviews.rs (lookup or create through Store)
//!     → views.rs (assemble the one-level nested representation)
//!     → Result<View, ApiError>
//! ```
//!
//! # Design Decisions
//! - Handlers are plain functions over `&dyn Store`; no HTTP types leak in
//! - Every failed lookup becomes `ApiError::NotFound` the same way
//! - Embedding is an explicit query plus assembly, never implicit loading

pub mod dog_houses;
pub mod reviews;
pub mod views;

pub use views::{DogHouseView, ReviewView};
