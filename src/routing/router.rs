//! Compiling the route table into an axum router.
//!
//! # Responsibilities
//! - One axum route per distinct path, verbs merged onto it
//! - Capture path parameters by position and hand them to dispatch
//! - Keep the matched `RouteEntry` attached to its handler
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Parameterless routes skip the `Path` extractor entirely
//! - A capture that fails to decode is an absent id, not a 400
//! - Entries are shared via `Arc`; one clone per request

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::HeaderMap,
    routing::{on, MethodRouter},
    Router,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::http::dispatch::dispatch;
use crate::http::server::AppState;
use crate::routing::table::{RouteEntry, RouteTable};

/// Build the axum router for every entry in `table`.
pub fn compile(table: &RouteTable) -> Router<AppState> {
    let mut by_path: BTreeMap<String, MethodRouter<AppState>> = BTreeMap::new();

    for entry in table.entries() {
        let path = entry.axum_path();
        let handler = method_router(entry.clone());
        let merged = match by_path.remove(&path) {
            Some(existing) => existing.merge(handler),
            None => handler,
        };
        by_path.insert(path, merged);
    }

    by_path
        .into_iter()
        .fold(Router::new(), |router, (path, methods)| {
            tracing::debug!(path = %path, "Route registered");
            router.route(&path, methods)
        })
}

fn method_router(entry: RouteEntry) -> MethodRouter<AppState> {
    let filter = entry.operation.action.method_filter();
    let has_params = !entry.param_names().is_empty();
    let entry = Arc::new(entry);

    if has_params {
        on(
            filter,
            move |State(state): State<AppState>,
                  params: Result<Path<HashMap<String, String>>, PathRejection>,
                  headers: HeaderMap,
                  body: Bytes| {
                let entry = Arc::clone(&entry);
                async move {
                    let params = match params {
                        Ok(Path(params)) => params,
                        Err(rejection) => {
                            tracing::debug!(
                                error = %rejection,
                                template = %entry.template,
                                "Undecodable path parameter"
                            );
                            undecodable(&entry)
                        }
                    };
                    dispatch(&state, &entry, params, &headers, &body)
                }
            },
        )
    } else {
        on(
            filter,
            move |State(state): State<AppState>, headers: HeaderMap, body: Bytes| {
                let entry = Arc::clone(&entry);
                async move { dispatch(&state, &entry, HashMap::new(), &headers, &body) }
            },
        )
    }
}

/// Captures that failed to percent-decode bind as empty strings, which never
/// parse as an id, so the request ends in the usual not-found response.
fn undecodable(entry: &RouteEntry) -> HashMap<String, String> {
    entry
        .captures()
        .into_iter()
        .map(|(capture, _)| (capture, String::new()))
        .collect()
}
