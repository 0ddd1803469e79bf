//! Record types and store error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a dog house row.
pub type DogHouseId = u64;

/// Identifier of a review row.
pub type ReviewId = u64;

/// A dog house listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogHouse {
    pub id: DogHouseId,
    pub name: String,
    #[serde(default)]
    pub city: String,
}

/// A review of one dog house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub dog_house_id: DogHouseId,
    pub username: String,
    pub comment: String,
    pub rating: i32,
}

/// Fields accepted when creating a review. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub dog_house_id: DogHouseId,
    pub username: String,
    pub comment: String,
    pub rating: i32,
}

impl NewReview {
    pub(crate) fn into_review(self, id: ReviewId) -> Review {
        Review {
            id,
            dog_house_id: self.dog_house_id,
            username: self.username,
            comment: self.comment,
            rating: self.rating,
        }
    }
}

/// Errors raised by store mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The review references a dog house that does not exist.
    #[error("DogHouse {0} does not exist")]
    MissingParent(DogHouseId),

    /// A seeded record reused an id already present in its table.
    #[error("{table} id {id} already exists")]
    DuplicateId { table: &'static str, id: u64 },
}
