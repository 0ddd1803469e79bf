//! Configuration file → seeded store → served over HTTP.

use std::io::Write;

use dog_house_reviews::config::{load_config, ConfigError};
use dog_house_reviews::store::seed::apply_seed;
use dog_house_reviews::MemoryStore;
use serde_json::Value;

mod common;

const SEEDED: &str = r#"
[listener]
bind_address = "127.0.0.1:0"

[[seed.dog_houses]]
id = 1
name = "Sunny Kennel"
city = "Portland"

[[seed.dog_houses]]
id = 2
name = "Shady Barn"
city = "Austin"

[[seed.reviews]]
id = 10
dog_house_id = 1
username = "rex"
comment = "roomy"
rating = 5

[[seed.reviews]]
id = 12
dog_house_id = 2
username = "spot"
comment = "drafty"
rating = 2
"#;

#[tokio::test]
async fn test_seeded_config_is_served() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SEEDED.as_bytes()).unwrap();

    let config = load_config(file.path()).unwrap();
    let store = MemoryStore::new();
    assert_eq!(apply_seed(&store, &config.seed).unwrap(), (2, 2));

    let server = common::start_server(store).await;
    let body: Value = server
        .client
        .get(server.url("/dog_houses/2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["name"], "Shady Barn");
    assert_eq!(body["reviews"][0]["username"], "spot");
}

#[test]
fn test_dangling_seed_review_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[[seed.reviews]]
id = 1
dog_house_id = 5
username = "rex"
comment = "lost"
rating = 1
"#,
    )
    .unwrap();

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("references missing dog house 5"));
}
