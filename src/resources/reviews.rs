//! Review resource handler.
//!
//! Serves the nested and the top-level routes with the same three
//! operations. The only place the two access paths differ is `index`, which
//! receives the parent-scope id when the route supplied one.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

use crate::http::error::ApiError;
use crate::resources::views::ReviewView;
use crate::routing::Resource;
use crate::store::{DogHouseId, NewReview, ReviewId, Store};

/// `GET /reviews` and `GET /dog_houses/:dog_house_id/reviews`.
///
/// With a parent id the dog house must exist and only its reviews are
/// returned; without one every review is returned. Ordered by review id.
pub fn index(store: &dyn Store, parent_id: Option<DogHouseId>) -> Result<Vec<ReviewView>, ApiError> {
    match parent_id {
        Some(id) => {
            let dog_house = store
                .find_dog_house(id)
                .ok_or(ApiError::NotFound(Resource::DogHouses))?;
            Ok(ReviewView::with_parent(store.reviews_where(id), &dog_house))
        }
        None => Ok(store
            .all_reviews()
            .into_iter()
            .map(|review| ReviewView::assemble(store, review))
            .collect()),
    }
}

/// `GET /reviews/:id` and `GET /dog_houses/:dog_house_id/reviews/:id`.
///
/// The parent segment of the nested route plays no part in the lookup.
pub fn show(store: &dyn Store, id: Option<ReviewId>) -> Result<ReviewView, ApiError> {
    let review = id
        .and_then(|id| store.find_review(id))
        .ok_or(ApiError::NotFound(Resource::Reviews))?;

    Ok(ReviewView::assemble(store, review))
}

/// `POST /reviews`.
pub fn create(store: &dyn Store, body: &[u8]) -> Result<ReviewView, ApiError> {
    let fields = CreateReview::from_body(body)?.into_new_review()?;
    let review = store.create_review(fields)?;

    tracing::info!(
        review_id = review.id,
        dog_house_id = review.dog_house_id,
        "Review created"
    );
    Ok(ReviewView::assemble(store, review))
}

/// The allow-listed create payload. Unknown fields are dropped by serde.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateReview {
    #[serde(default, deserialize_with = "optional_number")]
    pub dog_house_id: Option<DogHouseId>,
    pub username: String,
    pub comment: String,
    #[serde(deserialize_with = "number")]
    pub rating: i32,
}

impl CreateReview {
    /// Parse a flat body or one wrapped as `{"review": {...}}`.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let mut value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidBody(format!("malformed JSON body: {e}")))?;

        let wrapped = value
            .get_mut("review")
            .filter(|inner| inner.is_object())
            .map(serde_json::Value::take);
        if let Some(inner) = wrapped {
            value = inner;
        }

        serde_json::from_value(value)
            .map_err(|e| ApiError::InvalidBody(format!("invalid review: {e}")))
    }

    fn into_new_review(self) -> Result<NewReview, ApiError> {
        let dog_house_id = self
            .dog_house_id
            .ok_or_else(|| ApiError::Unprocessable("dog_house_id is required".to_string()))?;

        Ok(NewReview {
            dog_house_id,
            username: self.username,
            comment: self.comment,
            rating: self.rating,
        })
    }
}

/// A JSON number, or a string holding one.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

impl<T> NumberOrText<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn coerce<E: de::Error>(self) -> Result<T, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(text) => text.trim().parse().map_err(E::custom),
        }
    }
}

fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    NumberOrText::<T>::deserialize(deserializer)?.coerce()
}

fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    Option::<NumberOrText<T>>::deserialize(deserializer)?
        .map(|value| value.coerce())
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DogHouse, MemoryStore, Review};

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for id in [1, 2] {
            store
                .insert_dog_house(DogHouse { id, name: format!("H{id}"), city: String::new() })
                .unwrap();
        }
        for (id, parent) in [(10, 1), (11, 1), (12, 2)] {
            store
                .insert_review(Review {
                    id,
                    dog_house_id: parent,
                    username: format!("user{id}"),
                    comment: "fine".into(),
                    rating: 4,
                })
                .unwrap();
        }
        store
    }

    fn ids(views: &[ReviewView]) -> Vec<u64> {
        views.iter().map(|v| v.review.id).collect()
    }

    #[test]
    fn test_index_scoped_and_unscoped() {
        let store = seeded();
        assert_eq!(ids(&index(&store, Some(1)).unwrap()), vec![10, 11]);
        assert_eq!(ids(&index(&store, None).unwrap()), vec![10, 11, 12]);
    }

    #[test]
    fn test_index_unknown_parent_is_not_found() {
        let store = seeded();
        let err = index(&store, Some(99)).unwrap_err();
        assert_eq!(err.to_string(), "DogHouse not found");
    }

    #[test]
    fn test_index_embeds_parent() {
        let store = seeded();
        let views = index(&store, None).unwrap();
        assert_eq!(views[2].dog_house.as_ref().map(|d| d.id), Some(2));
    }

    #[test]
    fn test_show_missing_is_not_found() {
        let store = seeded();
        assert_eq!(show(&store, Some(404)).unwrap_err().to_string(), "Review not found");
        assert!(show(&store, None).is_err());
    }

    #[test]
    fn test_create_drops_unknown_fields_and_coerces() {
        let store = seeded();
        let body = br#"{"dog_house_id":"2","username":"fido","comment":"cozy","rating":"5","admin":true}"#;

        let view = create(&store, body).unwrap();
        assert_eq!(view.review.id, 13);
        assert_eq!(view.review.rating, 5);
        assert_eq!(view.review.dog_house_id, 2);
        assert_eq!(show(&store, Some(13)).unwrap(), view);
    }

    #[test]
    fn test_create_accepts_wrapped_body() {
        let store = seeded();
        let body = br#"{"review":{"dog_house_id":1,"username":"a","comment":"b","rating":1}}"#;
        assert_eq!(create(&store, body).unwrap().review.username, "a");
    }

    #[test]
    fn test_create_requires_existing_parent() {
        let store = seeded();
        let missing = br#"{"username":"a","comment":"b","rating":1}"#;
        assert!(matches!(create(&store, missing), Err(ApiError::Unprocessable(_))));

        let unknown = br#"{"dog_house_id":7,"username":"a","comment":"b","rating":1}"#;
        assert!(matches!(create(&store, unknown), Err(ApiError::Unprocessable(_))));
        assert_eq!(store.review_count(), 3);
    }

    #[test]
    fn test_create_rejects_malformed_body() {
        let store = seeded();
        assert!(matches!(create(&store, b"{not json"), Err(ApiError::InvalidBody(_))));
        assert!(matches!(
            create(&store, br#"{"dog_house_id":1,"rating":"lots"}"#),
            Err(ApiError::InvalidBody(_))
        ));
    }
}
