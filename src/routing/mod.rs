//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteTable::standard()
//!     → table.rs (resources + one level of nesting, parent param names)
//!     → router.rs (axum paths, verbs merged per path)
//!     → Freeze as immutable axum Router
//!
//! Incoming Request (verb, path)
//!     → axum match
//!     → params.rs (bind :id and the parent-scope parameter)
//!     → http::dispatch (operation → handler)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Every entry states its verb, template, operation and parent parameter
//! - Nesting is capped at one level when the table is built

pub mod params;
pub mod router;
pub mod table;

pub use params::RouteParams;
pub use router::compile;
pub use table::{Action, Operation, Resource, RouteEntry, RouteError, RouteTable};
