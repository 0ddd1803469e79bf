//! Loading seed records from configuration into a store.

use crate::config::schema::SeedConfig;
use crate::store::{Store, StoreError};

/// Insert every seeded dog house, then every seeded review.
///
/// Dog houses go first so that reviews always land after their parent.
/// Returns the number of (dog houses, reviews) inserted.
pub fn apply_seed(store: &dyn Store, seed: &SeedConfig) -> Result<(usize, usize), StoreError> {
    for dog_house in &seed.dog_houses {
        store.insert_dog_house(dog_house.clone())?;
    }
    for review in &seed.reviews {
        store.insert_review(review.clone())?;
    }

    tracing::info!(
        dog_houses = seed.dog_houses.len(),
        reviews = seed.reviews.len(),
        "Seed data loaded"
    );
    Ok((seed.dog_houses.len(), seed.reviews.len()))
}
