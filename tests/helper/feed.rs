//! Release index fixtures

use std::time::Duration;

use mockito::{Mock, ServerGuard};
use serde_json::{Value, json};

use tfrelease::release::source::HttpReleaseSource;

pub const INDEX_PATH: &str = "/terraform/index.json";

/// Build an index document in the shape served by releases.hashicorp.com
pub fn terraform_index(versions: &[&str]) -> Value {
    let versions: serde_json::Map<String, Value> = versions
        .iter()
        .map(|version| {
            (
                version.to_string(),
                json!({
                    "name": "terraform",
                    "version": version,
                    "shasums": format!("terraform_{version}_SHA256SUMS"),
                    "builds": [{
                        "name": "terraform",
                        "version": version,
                        "os": "linux",
                        "arch": "amd64",
                        "filename": format!("terraform_{version}_linux_amd64.zip")
                    }]
                }),
            )
        })
        .collect();

    json!({ "name": "terraform", "versions": versions })
}

/// Serve `body` as the release index
pub async fn serve_index(server: &mut ServerGuard, body: &Value) -> Mock {
    server
        .mock("GET", INDEX_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub fn create_source(server: &ServerGuard) -> HttpReleaseSource {
    HttpReleaseSource::new(
        &format!("{}{}", server.url(), INDEX_PATH),
        Duration::from_secs(5),
        "tfrelease-test",
    )
    .unwrap()
}
