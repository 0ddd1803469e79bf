//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (seeded reviews reference seeded dog houses)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} `{value}`")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("unknown log level `{0}`")]
    UnknownLogLevel(String),

    #[error("duplicate seeded {table} id {id}")]
    DuplicateSeedId { table: &'static str, id: u64 },

    #[error("seeded review {review_id} references missing dog house {dog_house_id}")]
    DanglingReview { review_id: u64, dog_house_id: u64 },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut dog_house_ids = HashSet::new();
    for dog_house in &config.seed.dog_houses {
        if !dog_house_ids.insert(dog_house.id) {
            errors.push(ValidationError::DuplicateSeedId { table: "dog_houses", id: dog_house.id });
        }
    }

    let mut review_ids = HashSet::new();
    for review in &config.seed.reviews {
        if !review_ids.insert(review.id) {
            errors.push(ValidationError::DuplicateSeedId { table: "reviews", id: review.id });
        }
        if !dog_house_ids.contains(&review.dog_house_id) {
            errors.push(ValidationError::DanglingReview {
                review_id: review.id,
                dog_house_id: review.dog_house_id,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DogHouse, Review};

    fn review(id: u64, dog_house_id: u64) -> Review {
        Review {
            id,
            dog_house_id,
            username: "rex".into(),
            comment: "ok".into(),
            rating: 3,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::Zero("timeouts.request_secs")));
        assert!(errors.contains(&ValidationError::UnknownLogLevel("loud".into())));
    }

    #[test]
    fn test_rejects_dangling_and_duplicate_seeds() {
        let mut config = ServiceConfig::default();
        config.seed.dog_houses.push(DogHouse { id: 1, name: "A".into(), city: String::new() });
        config.seed.reviews.push(review(10, 1));
        config.seed.reviews.push(review(10, 1));
        config.seed.reviews.push(review(11, 2));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateSeedId { table: "reviews", id: 10 },
                ValidationError::DanglingReview { review_id: 11, dog_house_id: 2 },
            ]
        );
    }
}
