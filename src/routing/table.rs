//! Declarative route table.
//!
//! # Responsibilities
//! - Describe every (verb, path template) → (resource, action) pair
//! - Name the parent-scope parameter a nested entry injects
//! - Reject tables that nest more than one level deep
//!
//! # Design Decisions
//! - Templates use `:name` segments; the axum path is derived, with
//!   captures named by position and mapped back when binding
//! - Parent parameter naming is a plain function, not a side effect of
//!   registration order
//! - Built once at startup, immutable afterwards

use axum::routing::MethodFilter;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A resource collection exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    DogHouses,
    Reviews,
}

impl Resource {
    /// Collection name as it appears in the path.
    pub fn collection(self) -> &'static str {
        match self {
            Self::DogHouses => "dog_houses",
            Self::Reviews => "reviews",
        }
    }

    /// Model name used in error messages.
    pub fn model_name(self) -> &'static str {
        match self {
            Self::DogHouses => "DogHouse",
            Self::Reviews => "Review",
        }
    }

    /// Actions a handler exists for.
    pub fn supports(self, action: Action) -> bool {
        match self {
            Self::DogHouses => matches!(action, Action::Show),
            Self::Reviews => matches!(action, Action::Index | Action::Show | Action::Create),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// A conventional REST action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Index,
    Show,
    Create,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::Create => "create",
        }
    }

    /// HTTP verb the action answers to.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Index | Self::Show => "GET",
            Self::Create => "POST",
        }
    }

    pub(crate) fn method_filter(self) -> MethodFilter {
        match self {
            Self::Index | Self::Show => MethodFilter::GET,
            Self::Create => MethodFilter::POST,
        }
    }

    /// Member actions address one record through `:id`.
    fn is_member(self) -> bool {
        matches!(self, Self::Show)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The handler operation a route resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub resource: Resource,
    pub action: Action,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.resource, self.action)
    }
}

/// Parent scope injected by a nested route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentScope {
    pub resource: Resource,
    /// Path parameter carrying the parent id, e.g. `dog_house_id`.
    pub param: String,
}

/// One row of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub operation: Operation,
    /// Path template in `:name` form.
    pub template: String,
    pub parent: Option<ParentScope>,
}

impl RouteEntry {
    pub fn verb(&self) -> &'static str {
        self.operation.action.verb()
    }

    /// Names of the `:name` segments, in path order.
    pub fn param_names(&self) -> Vec<&str> {
        self.template
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
            .collect()
    }

    /// Template rewritten to axum's `{capture}` syntax.
    ///
    /// Captures are named by segment position, not by the declared name:
    /// `/dog_houses/:id` and `/dog_houses/:dog_house_id/reviews` share a
    /// prefix, and the matcher requires one capture name per position.
    pub fn axum_path(&self) -> String {
        self.template
            .split('/')
            .enumerate()
            .map(|(position, segment)| match segment.strip_prefix(':') {
                Some(_) => format!("{{{}}}", capture_name(position)),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// (capture name in the axum path, declared parameter name) pairs.
    pub fn captures(&self) -> Vec<(String, &str)> {
        self.template
            .split('/')
            .enumerate()
            .filter_map(|(position, segment)| {
                segment
                    .strip_prefix(':')
                    .map(|name| (capture_name(position), name))
            })
            .collect()
    }
}

fn capture_name(position: usize) -> String {
    format!("seg{position}")
}

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("{resource} has no {action} handler")]
    UnsupportedAction { resource: Resource, action: Action },

    #[error("cannot nest {child} under {parent}: {parent} is not a top-level resource")]
    NestedTooDeep { parent: Resource, child: Resource },

    #[error("duplicate route {verb} {template}")]
    Duplicate { verb: &'static str, template: String },
}

/// Singular form of a collection name (`dog_houses` → `dog_house`).
pub fn singularize(collection: &str) -> String {
    if let Some(stem) = collection.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = collection.strip_suffix("xes") {
        format!("{stem}x")
    } else if let Some(stem) = collection.strip_suffix('s') {
        stem.to_string()
    } else {
        collection.to_string()
    }
}

/// Name of the parameter a parent collection injects into nested routes.
pub fn parent_param(collection: &str) -> String {
    format!("{}_id", singularize(collection))
}

/// The compiled, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// The service's public surface.
    pub fn standard() -> Result<Self, RouteError> {
        Self::builder()
            .resources(Resource::DogHouses, &[Action::Show])
            .nested(Resource::DogHouses, Resource::Reviews, &[Action::Index, Action::Show])
            .resources(Resource::Reviews, &[Action::Index, Action::Show, Action::Create])
            .build()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Find the entry for a verb and template, mainly for diagnostics.
    pub fn find(&self, verb: &str, template: &str) -> Option<&RouteEntry> {
        self.entries
            .iter()
            .find(|entry| entry.verb() == verb && entry.template == template)
    }
}

/// Collects resource registrations; the first error wins.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
    top_level: HashSet<Resource>,
    error: Option<RouteError>,
}

impl RouteTableBuilder {
    /// Register a top-level resource: `/<collection>` and `/<collection>/:id`.
    pub fn resources(mut self, resource: Resource, actions: &[Action]) -> Self {
        self.top_level.insert(resource);
        let base = format!("/{}", resource.collection());
        for &action in actions {
            self.push(resource, action, &base, None);
        }
        self
    }

    /// Register `child` under `parent`: `/<parent>/:<parent>_id/<child>[/:id]`.
    ///
    /// `parent` must already be registered as a top-level resource, which
    /// caps nesting at one level.
    pub fn nested(mut self, parent: Resource, child: Resource, actions: &[Action]) -> Self {
        if !self.top_level.contains(&parent) {
            self.fail(RouteError::NestedTooDeep { parent, child });
            return self;
        }

        let param = parent_param(parent.collection());
        let base = format!("/{}/:{}/{}", parent.collection(), param, child.collection());
        let scope = ParentScope { resource: parent, param };
        for &action in actions {
            self.push(child, action, &base, Some(scope.clone()));
        }
        self
    }

    pub fn build(self) -> Result<RouteTable, RouteError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(RouteTable { entries: self.entries }),
        }
    }

    fn push(&mut self, resource: Resource, action: Action, base: &str, parent: Option<ParentScope>) {
        if !resource.supports(action) {
            self.fail(RouteError::UnsupportedAction { resource, action });
            return;
        }

        let template = if action.is_member() {
            format!("{base}/:id")
        } else {
            base.to_string()
        };

        let duplicate = self
            .entries
            .iter()
            .any(|entry| entry.verb() == action.verb() && entry.template == template);
        if duplicate {
            self.fail(RouteError::Duplicate { verb: action.verb(), template });
            return;
        }

        self.entries.push(RouteEntry {
            operation: Operation { resource, action },
            template,
            parent,
        });
    }

    fn fail(&mut self, err: RouteError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
