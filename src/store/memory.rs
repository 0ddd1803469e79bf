//! In-memory store backed by sharded concurrent maps.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::store::types::{DogHouse, DogHouseId, NewReview, Review, ReviewId, StoreError};
use crate::store::Store;

/// A row type that carries its own id.
trait Record: Clone {
    const TABLE: &'static str;

    fn id(&self) -> u64;
}

impl Record for DogHouse {
    const TABLE: &'static str = "dog_houses";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Review {
    const TABLE: &'static str = "reviews";

    fn id(&self) -> u64 {
        self.id
    }
}

/// One table: rows keyed by id plus the id sequence.
struct Table<T> {
    rows: DashMap<u64, T>,
    /// Next id handed out by `create`. Always greater than every stored id.
    next_id: AtomicU64,
}

impl<T: Record> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn find(&self, id: u64) -> Option<T> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    fn find_all_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<T> = self
            .rows
            .iter()
            .filter(|row| predicate(row.value()))
            .map(|row| row.value().clone())
            .collect();
        // DashMap iteration order is shard order; callers expect id order.
        rows.sort_by_key(|row| row.id());
        rows
    }

    fn insert(&self, record: T) -> Result<T, StoreError> {
        let id = record.id();
        match self.rows.entry(id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId { table: T::TABLE, id }),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                self.next_id.fetch_max(id.saturating_add(1), Ordering::SeqCst);
                Ok(record)
            }
        }
    }

    fn create(&self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = build(id);
        self.rows.insert(id, record.clone());
        record
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// The default [`Store`]: two tables held in process memory.
pub struct MemoryStore {
    dog_houses: Table<DogHouse>,
    reviews: Table<Review>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            dog_houses: Table::new(),
            reviews: Table::new(),
        }
    }

    /// Number of dog houses stored.
    pub fn dog_house_count(&self) -> usize {
        self.dog_houses.len()
    }

    /// Number of reviews stored.
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn find_dog_house(&self, id: DogHouseId) -> Option<DogHouse> {
        self.dog_houses.find(id)
    }

    fn find_review(&self, id: ReviewId) -> Option<Review> {
        self.reviews.find(id)
    }

    fn all_reviews(&self) -> Vec<Review> {
        self.reviews.find_all_where(|_| true)
    }

    fn reviews_where(&self, dog_house_id: DogHouseId) -> Vec<Review> {
        self.reviews
            .find_all_where(|review| review.dog_house_id == dog_house_id)
    }

    fn create_review(&self, fields: NewReview) -> Result<Review, StoreError> {
        if self.dog_houses.find(fields.dog_house_id).is_none() {
            return Err(StoreError::MissingParent(fields.dog_house_id));
        }
        Ok(self.reviews.create(|id| fields.into_review(id)))
    }

    fn insert_dog_house(&self, dog_house: DogHouse) -> Result<DogHouse, StoreError> {
        self.dog_houses.insert(dog_house)
    }

    fn insert_review(&self, review: Review) -> Result<Review, StoreError> {
        self.reviews.insert(review)
    }
}
