mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn owner_deletes_property() -> Result<()> {
    let server = common::TestServer::start().await?;
    let seeded = server.seed("u1", "Loft").await?;
    let client = reqwest::Client::new();

    let res = client
        .delete(server.url(&format!("/properties/{}", seeded.id)))
        .bearer_auth(common::token_for("u1"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    common::assert_cors(&res);
    assert_eq!(res.text().await?, "Property Deleted");

    // Gone for subsequent reads
    let res = client
        .get(server.url(&format!("/properties/{}", seeded.id)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(server.store.is_empty().await);

    Ok(())
}

#[tokio::test]
async fn session_cookie_is_accepted() -> Result<()> {
    let server = common::TestServer::start().await?;
    let seeded = server.seed("u1", "Loft").await?;

    let res = reqwest::Client::new()
        .delete(server.url(&format!("/api/properties/{}", seeded.id)))
        .header(
            "cookie",
            format!("{}={}", common::SESSION_COOKIE, common::token_for("u1")),
        )
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "Property Deleted");

    Ok(())
}

#[tokio::test]
async fn non_owner_cannot_delete() -> Result<()> {
    let server = common::TestServer::start().await?;
    let seeded = server.seed("u1", "Loft").await?;

    let res = reqwest::Client::new()
        .delete(server.url(&format!("/properties/{}", seeded.id)))
        .bearer_auth(common::token_for("u2"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    common::assert_cors(&res);
    assert_eq!(res.text().await?, "Unauthorized");
    assert_eq!(server.store.len().await, 1);

    Ok(())
}

#[tokio::test]
async fn anonymous_delete_is_rejected_before_lookup() -> Result<()> {
    let server = common::TestServer::start().await?;

    // Missing record, but authentication is checked first
    let res = reqwest::Client::new()
        .delete(server.url("/properties/abc"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    common::assert_cors(&res);
    assert_eq!(res.text().await?, "User ID is required");

    Ok(())
}

#[tokio::test]
async fn delete_missing_property_is_404() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = reqwest::Client::new()
        .delete(server.url("/properties/abc"))
        .bearer_auth(common::token_for("u1"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "Property Not Found");

    Ok(())
}
