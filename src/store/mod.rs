//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     SeedConfig (dog_houses, reviews)
//!     → seed.rs (insert with explicit ids)
//!     → MemoryStore tables
//!
//! Per request:
//!     resource handler
//!     → Store::find_* / reviews_where / create_review
//!     → owned records (cloned out of the table)
//! ```
//!
//! # Design Decisions
//! - Handlers only see the `Store` trait; the in-memory store is one impl
//! - Lookups return `Option`, the HTTP layer decides what absence means
//! - Referential integrity on create is enforced here, not in the handler
//! - Records are cloned out; no guards escape the store

pub mod memory;
pub mod seed;
pub mod types;

pub use memory::MemoryStore;
pub use types::{DogHouse, DogHouseId, NewReview, Review, ReviewId, StoreError};

/// The persistence interface consumed by the resource handlers.
///
/// Implementations provide their own concurrency control; callers hold the
/// store behind an `Arc` and never lock around it.
pub trait Store: Send + Sync + 'static {
    /// Look up a dog house by id.
    fn find_dog_house(&self, id: DogHouseId) -> Option<DogHouse>;

    /// Look up a review by id.
    fn find_review(&self, id: ReviewId) -> Option<Review>;

    /// Every review, ordered by id.
    fn all_reviews(&self) -> Vec<Review>;

    /// Reviews whose parent reference equals `dog_house_id`, ordered by id.
    fn reviews_where(&self, dog_house_id: DogHouseId) -> Vec<Review>;

    /// Create a review with a freshly assigned id.
    ///
    /// Fails with [`StoreError::MissingParent`] when the referenced dog house
    /// does not exist.
    fn create_review(&self, fields: NewReview) -> Result<Review, StoreError>;

    /// Insert a dog house carrying its own id (seed path).
    fn insert_dog_house(&self, dog_house: DogHouse) -> Result<DogHouse, StoreError>;

    /// Insert a review carrying its own id (seed path).
    fn insert_review(&self, review: Review) -> Result<Review, StoreError>;
}
