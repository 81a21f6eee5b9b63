mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn binary_serves_products_and_guards_wishlists() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let greeting = client.get(format!("{}/", server.base_url)).send().await?;
    assert_eq!(greeting.status(), StatusCode::OK);
    assert_eq!(greeting.text().await?, "Hello World!");

    let created = client
        .post(format!("{}/products", server.base_url))
        .json(&json!({ "name": "Lamp", "price": 30 }))
        .send()
        .await?;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = created.json::<serde_json::Value>().await?;
    let id = body["data"]["id"].as_str().unwrap_or_default().to_string();

    let fetched = client
        .get(format!("{}/products/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(fetched.status(), StatusCode::OK);

    let guarded = client
        .get(format!("{}/wishlists/my-wishlist", server.base_url))
        .send()
        .await?;
    assert_eq!(guarded.status(), StatusCode::UNAUTHORIZED);

    // Cross-origin requests are allowed from anywhere
    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("{}/products", server.base_url))
        .header("origin", "https://shop.example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await?;
    assert!(preflight.headers().contains_key("access-control-allow-origin"));

    Ok(())
}
