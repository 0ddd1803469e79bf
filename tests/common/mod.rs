//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use dog_house_reviews::config::ServiceConfig;
use dog_house_reviews::store::{DogHouse, Review};
use dog_house_reviews::{HttpServer, MemoryStore, Shutdown, Store};

/// A server running on an ephemeral port. Shuts down when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server over `store` on 127.0.0.1 with an OS-assigned port.
pub async fn start_server(store: MemoryStore) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(ServiceConfig::default(), Arc::new(store)).unwrap();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    TestServer { addr, client, shutdown }
}

/// Dog house 1 with reviews 10 and 11; dog house 2 with review 12.
pub fn scenario_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .insert_dog_house(DogHouse { id: 1, name: "Sunny Kennel".into(), city: "Portland".into() })
        .unwrap();
    store
        .insert_dog_house(DogHouse { id: 2, name: "Shady Barn".into(), city: "Austin".into() })
        .unwrap();
    for (id, dog_house_id, username) in [(10, 1, "rex"), (11, 1, "fido"), (12, 2, "spot")] {
        store
            .insert_review(Review {
                id,
                dog_house_id,
                username: username.into(),
                comment: format!("review {id}"),
                rating: 4,
            })
            .unwrap();
    }
    store
}
