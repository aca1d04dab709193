mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn category_crud_scenario() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/categories"))
        .json(&json!({"name": "Food", "description": "Edibles"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"id": 1, "name": "Food", "description": "Edibles"})
    );

    let res = client.get(server.url("/api/categories/1")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"id": 1, "name": "Food", "description": "Edibles"})
    );

    let res = client
        .put(server.url("/api/categories/1"))
        .json(&json!({"name": "Food & Drink", "description": "Edibles and drinkables"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"id": 1, "name": "Food & Drink", "description": "Edibles and drinkables"})
    );

    let res = client.delete(server.url("/api/categories/1")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"message": "Category deleted successfully"})
    );

    let res = client.get(server.url("/api/categories/1")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Category not found"}));

    Ok(())
}

#[tokio::test]
async fn list_reflects_creates_and_deletes() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    for name in ["Food", "Tools", "Books", "Games"] {
        let res = client
            .post(server.url("/api/categories"))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    client.delete(server.url("/api/categories/2")).send().await?;
    client
        .put(server.url("/api/categories/3"))
        .json(&json!({"name": "Comics", "description": "Panels"}))
        .send()
        .await?;

    let list = client
        .get(server.url("/api/categories"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(
        list,
        json!([
            {"id": 1, "name": "Food", "description": ""},
            {"id": 3, "name": "Comics", "description": "Panels"},
            {"id": 4, "name": "Games", "description": ""},
        ])
    );
    Ok(())
}

#[tokio::test]
async fn rejects_bad_input() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/categories"))
        .json(&json!({"name": "ab"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"error": "Category name must be at least 3 characters"})
    );

    let res = client
        .post(server.url("/api/categories"))
        .json(&json!({"name": "  a  "}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"error": "Category name must be at least 3 characters"})
    );

    let res = client
        .post(server.url("/api/categories"))
        .header("content-type", "application/json")
        .body("[1, 2")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(server.url("/api/categories/one")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Invalid Category ID"}));

    let res = client.patch(server.url("/api/categories/1")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}
