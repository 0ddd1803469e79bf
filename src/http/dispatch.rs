//! Dispatch from a matched route entry to its handler operation.
//!
//! # Data Flow
//! ```text
//! matched RouteEntry + raw path params + body
//!     → RouteParams::bind (id, parent scope)
//!     → resources::{dog_houses, reviews}
//!     → JSON response or ApiError response
//!     → metrics::record_request
//! ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::time::Instant;

use crate::http::error::ApiError;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resources::{dog_houses, reviews};
use crate::routing::params::parse_id;
use crate::routing::{Action, Resource, RouteEntry, RouteParams};

/// Run the operation behind `entry` and render the result.
pub fn dispatch(
    state: &AppState,
    entry: &RouteEntry,
    raw_params: HashMap<String, String>,
    headers: &HeaderMap,
    body: &[u8],
) -> Response {
    let start_time = Instant::now();
    let operation = entry.operation;
    let params = RouteParams::bind(entry, raw_params);

    tracing::debug!(
        request_id = %request_id(headers),
        operation = %operation,
        template = %entry.template,
        "Dispatching request"
    );

    let response = match run(state, entry, &params, body) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(
                request_id = %request_id(headers),
                operation = %operation,
                status = err.status().as_u16(),
                error = %err,
                "Request rejected"
            );
            err.into_response()
        }
    };

    metrics::record_request(&operation.to_string(), response.status().as_u16(), start_time);
    response
}

fn run(
    state: &AppState,
    entry: &RouteEntry,
    params: &RouteParams,
    body: &[u8],
) -> Result<Response, ApiError> {
    let store = state.store.as_ref();
    let operation = entry.operation;

    match (operation.resource, operation.action) {
        (Resource::DogHouses, Action::Show) => {
            let view = dog_houses::show(store, params.id())?;
            Ok(Json(view).into_response())
        }
        (Resource::Reviews, Action::Index) => {
            let view = reviews::index(store, parent_id(params)?)?;
            Ok(Json(view).into_response())
        }
        (Resource::Reviews, Action::Show) => {
            let view = reviews::show(store, params.id())?;
            Ok(Json(view).into_response())
        }
        (Resource::Reviews, Action::Create) => {
            let view = reviews::create(store, body)?;
            let location = format!("/{}/{}", Resource::Reviews.collection(), view.review.id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(view)).into_response())
        }
        // The route table refuses to register these pairings.
        (Resource::DogHouses, Action::Index | Action::Create) => Err(ApiError::RouteNotFound),
    }
}

/// The parent-scope id, if the route is nested. A parent segment that is not
/// an id names no parent, so it is reported as the parent not being found.
fn parent_id(params: &RouteParams) -> Result<Option<u64>, ApiError> {
    match &params.parent {
        None => Ok(None),
        Some((resource, raw)) => parse_id(raw)
            .map(Some)
            .ok_or(ApiError::NotFound(*resource)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Operation, RouteTable};
    use crate::store::{DogHouse, MemoryStore, Store};
    use std::sync::Arc;

    #[test]
    fn test_every_supported_pairing_has_a_handler() {
        let store = MemoryStore::new();
        store
            .insert_dog_house(DogHouse { id: 1, name: "Sunny".into(), city: String::new() })
            .unwrap();
        let state = AppState { store: Arc::new(store) };
        let body = br#"{"dog_house_id":1,"username":"rex","comment":"roomy","rating":5}"#;

        for resource in [Resource::DogHouses, Resource::Reviews] {
            for action in [Action::Index, Action::Show, Action::Create] {
                let entry = RouteEntry {
                    operation: Operation { resource, action },
                    template: format!("/{}", resource.collection()),
                    parent: None,
                };
                let result = run(&state, &entry, &RouteParams::default(), body);
                let unrouted = matches!(result, Err(ApiError::RouteNotFound));
                assert_eq!(unrouted, !resource.supports(action), "{}", entry.operation);
            }
        }

        // Every entry of the served table lands on a handler.
        let table = RouteTable::standard().unwrap();
        assert!(table.entries().iter().all(|e| e.operation.resource.supports(e.operation.action)));
    }
}
