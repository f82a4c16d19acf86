//! Testcontainer setup for MongoDB.
//!
//! Set `FEEDBACK_TEST_MONGO_URL` to run against an existing server instead
//! of starting a container.

use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

/// Handle for a MongoDB instance used by one test.
pub struct TestMongo {
    #[allow(dead_code)]
    container: Option<ContainerAsync<GenericImage>>,
    pub url: String,
}

impl TestMongo {
    pub async fn start() -> Self {
        if let Some(url) = std::env::var("FEEDBACK_TEST_MONGO_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            return Self {
                container: None,
                url,
            };
        }

        let (container, url) = start_mongo().await;
        Self {
            container: Some(container),
            url,
        }
    }
}

/// Start a MongoDB container, return container and connection string.
pub async fn start_mongo() -> (ContainerAsync<GenericImage>, String) {
    let image = GenericImage::new("mongo", "7")
        .with_exposed_port(27017.tcp())
        .with_wait_for(WaitFor::message_on_stdout("Waiting for connections"))
        .with_startup_timeout(std::time::Duration::from_secs(60));

    let container = image.start().await.expect("Failed to start MongoDB");
    let port = container
        .get_host_port_ipv4(27017)
        .await
        .expect("MongoDB port not mapped");

    (container, format!("mongodb://127.0.0.1:{}", port))
}
