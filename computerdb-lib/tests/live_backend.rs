//! Tests against a running Computer Database backend.
//!
//! These are ignored by default. To run them, create a `.env` file in the
//! computerdb-lib directory with:
//!
//! ```env
//! COMPUTERDB_URL=http://localhost:8080/ComputerDatabase/api/computers
//!
//! # Optional, for secured deployments
//! COMPUTERDB_AUTH_URL=http://localhost:8080/ComputerDatabase/oauth/authorize
//! COMPUTERDB_USERNAME=admin
//! COMPUTERDB_PASSWORD=secret
//! ```
//!
//! Then run: `cargo test -p computerdb-lib -- --ignored`

use std::env;

use computerdb_lib::ComputerDbClient;
use computerdb_lib::api::PageRequest;

fn live_client() -> Option<ComputerDbClient> {
    let _ = dotenvy::dotenv();

    let url = env::var("COMPUTERDB_URL").ok()?;
    let builder = ComputerDbClient::builder().endpoint(url);

    let builder = match (
        env::var("COMPUTERDB_AUTH_URL"),
        env::var("COMPUTERDB_USERNAME"),
        env::var("COMPUTERDB_PASSWORD"),
    ) {
        (Ok(auth_url), Ok(username), Ok(password)) => builder.login(auth_url, username, password),
        _ => builder,
    };

    builder.build().ok()
}

#[tokio::test]
#[ignore]
async fn test_live_first_page() {
    let Some(client) = live_client() else {
        eprintln!("Skipping: COMPUTERDB_URL not set");
        return;
    };

    let page = client
        .list_computers(PageRequest::new(0, 10))
        .await
        .expect("listing failed");

    assert!(page.len() <= 10);
    println!("Fetched {} computers", page.len());

    if let Some(first) = page.records().first()
        && let Some(id) = first.id
    {
        let fetched = client.get_computer(id).await.expect("get failed");
        assert_eq!(fetched.map(|c| c.name), Some(first.name.clone()));
    }
}

#[tokio::test]
#[ignore]
async fn test_live_companies() {
    let Some(client) = live_client() else {
        eprintln!("Skipping: COMPUTERDB_URL not set");
        return;
    };

    let page = client
        .list_companies(PageRequest::default())
        .await
        .expect("listing companies failed");
    println!("Fetched {} companies", page.len());
}
