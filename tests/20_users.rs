mod common;

use anyhow::Result;
use common::TestServer;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn lookup_by_id_or_email() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, alice_id) = server.account("alice@example.com").await?;
    let (bob_token, _) = server.account("bob@example.com").await?;

    let by_id: Value = server
        .get(&format!("/users/{}", alice_id), Some(&bob_token))
        .await?
        .json()
        .await?;
    assert_eq!(by_id["email"], "alice@example.com");

    let by_email: Value = server
        .get("/users/alice@example.com", Some(&bob_token))
        .await?
        .json()
        .await?;
    assert_eq!(by_email["id"], alice_id);

    assert_eq!(server.get("/users/9999", Some(&bob_token)).await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        server.get("/users/ghost@example.com", Some(&bob_token)).await?.status(),
        StatusCode::NOT_FOUND
    );
    Ok(())
}

#[tokio::test]
async fn accounts_are_self_managed() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (alice_token, alice_id) = server.account("alice@example.com").await?;
    let (bob_token, _) = server.account("bob@example.com").await?;

    let update = json!({ "email": "alice@example.com", "password": "x", "name": "Hacked", "firstname": "H" });
    let res = server.put(&format!("/users/{}", alice_id), Some(&bob_token), &update).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let err: Value = res.json().await?;
    assert_eq!(err["msg"], "Unauthorized");

    let res = server.delete(&format!("/users/{}", alice_id), Some(&bob_token)).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let alice: Value = server.get("/user", Some(&alice_token)).await?.json().await?;
    assert_eq!(alice["name"], "Doe");
    Ok(())
}

#[tokio::test]
async fn update_replaces_the_account() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (token, id) = server.account("old@example.com").await?;

    let res = server
        .put(
            &format!("/users/{}", id),
            Some(&token),
            &json!({ "email": "new@example.com", "password": "fresh", "name": "Smith", "firstname": "Ann" }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["email"], "new@example.com");
    assert_eq!(updated["name"], "Smith");

    // The new password is in effect, the old one is not
    let res = server
        .post("/login", None, &json!({ "email": "new@example.com", "password": "fresh" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let res = server
        .post("/login", None, &json!({ "email": "new@example.com", "password": "pa55word" }))
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Partial bodies are rejected
    let res = server
        .put(&format!("/users/{}", id), Some(&token), &json!({ "name": "Only" }))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn taking_another_accounts_email_conflicts() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.account("taken@example.com").await?;
    let (token, id) = server.account("mine@example.com").await?;

    let res = server
        .put(
            &format!("/users/{}", id),
            Some(&token),
            &json!({ "email": "taken@example.com", "password": "p", "name": "N", "firstname": "F" }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn deleting_an_account_removes_its_todos() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (token, id) = server.account("leaving@example.com").await?;
    let (other_token, _) = server.account("staying@example.com").await?;
    let todo = server.create_todo(&token, id, "orphan", "2030-05-01 12:00:00").await?;

    let res = server.delete(&format!("/users/{}", id), Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .get(&format!("/todos/{}", todo["id"]), Some(&other_token))
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The token is still signed correctly but names nobody
    assert_eq!(server.get("/user", Some(&token)).await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        server.delete(&format!("/users/{}", id), Some(&token)).await?.status(),
        StatusCode::NOT_FOUND
    );
    Ok(())
}
