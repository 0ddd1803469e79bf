//! Response shaping: the nested JSON representations.
//!
//! A dog house embeds its reviews; a review embeds its dog house. Embedding
//! stops after one level in both directions.

use serde::Serialize;

use crate::store::{DogHouse, Review, Store};

/// `DogHouse.show` representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DogHouseView {
    #[serde(flatten)]
    pub dog_house: DogHouse,
    pub reviews: Vec<Review>,
}

/// `Review.show` / `Review.index` representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    /// `None` only if the parent row is missing from the store.
    pub dog_house: Option<DogHouse>,
}

impl DogHouseView {
    pub fn assemble(store: &dyn Store, dog_house: DogHouse) -> Self {
        let reviews = store.reviews_where(dog_house.id);
        Self { dog_house, reviews }
    }
}

impl ReviewView {
    pub fn assemble(store: &dyn Store, review: Review) -> Self {
        let dog_house = store.find_dog_house(review.dog_house_id);
        Self { review, dog_house }
    }

    /// Shape a list of reviews sharing one known parent without re-fetching it.
    pub fn with_parent(reviews: Vec<Review>, dog_house: &DogHouse) -> Vec<Self> {
        reviews
            .into_iter()
            .map(|review| Self {
                review,
                dog_house: Some(dog_house.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_dog_house(DogHouse { id: 1, name: "Sunny".into(), city: "Portland".into() })
            .unwrap();
        store
            .insert_review(Review {
                id: 10,
                dog_house_id: 1,
                username: "rex".into(),
                comment: "roomy".into(),
                rating: 5,
            })
            .unwrap();
        store
    }

    #[test]
    fn test_dog_house_view_embeds_reviews_one_level() {
        let store = seeded();
        let dog_house = store.find_dog_house(1).unwrap();
        let value = serde_json::to_value(DogHouseView::assemble(&store, dog_house)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Sunny",
                "city": "Portland",
                "reviews": [
                    {"id": 10, "dog_house_id": 1, "username": "rex", "comment": "roomy", "rating": 5}
                ]
            })
        );
    }

    #[test]
    fn test_review_view_embeds_dog_house() {
        let store = seeded();
        let review = store.find_review(10).unwrap();
        let value = serde_json::to_value(ReviewView::assemble(&store, review)).unwrap();

        assert_eq!(value["dog_house"], json!({"id": 1, "name": "Sunny", "city": "Portland"}));
        assert_eq!(value["username"], "rex");
        assert!(value["dog_house"].get("reviews").is_none());
    }
}
