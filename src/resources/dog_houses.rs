//! Dog house resource handler.

use crate::http::error::ApiError;
use crate::resources::views::DogHouseView;
use crate::routing::Resource;
use crate::store::{DogHouseId, Store};

/// `GET /dog_houses/:id` — the dog house with all of its reviews.
pub fn show(store: &dyn Store, id: Option<DogHouseId>) -> Result<DogHouseView, ApiError> {
    let dog_house = id
        .and_then(|id| store.find_dog_house(id))
        .ok_or(ApiError::NotFound(Resource::DogHouses))?;

    Ok(DogHouseView::assemble(store, dog_house))
}
