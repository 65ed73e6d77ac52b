/// Integration tests for the joushiki API
///
/// These tests drive the full router in-process against a real
/// PostgreSQL database and are marked `#[ignore]`; run them with:
///
///   cargo test -p joushiki-api --test integration_test -- --ignored
///
/// Database URL is taken from the DATABASE_URL environment variable.

mod common;

use axum::http::StatusCode;
use common::{create_test_fact, expect_status, unique_user_name, TestContext};
use serde_json::json;

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_register_login_flow() {
    let mut ctx = TestContext::new().await.unwrap();
    let user_name = unique_user_name("flow");

    // Register
    let response = ctx
        .post_json(
            "/auth/register",
            json!({ "user_name": user_name, "password": "shinkansen8" }),
        )
        .await;
    let body = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(body["user_name"], user_name);
    assert!(body["id"].is_i64());
    assert!(body.get("password_hash").is_none(), "Hash must not leak");

    // Login with the right password
    let response = ctx
        .post_json(
            "/auth/login",
            json!({ "user_name": user_name, "password": "shinkansen8" }),
        )
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["user_name"], user_name);

    // Wrong password
    let response = ctx
        .post_json(
            "/auth/login",
            json!({ "user_name": user_name, "password": "wrong-password" }),
        )
        .await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;

    // Unknown username gets the same 401, not a 404
    let response = ctx
        .post_json(
            "/auth/login",
            json!({ "user_name": unique_user_name("ghost"), "password": "whatever123" }),
        )
        .await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_duplicate_registration_rejected() {
    let mut ctx = TestContext::new().await.unwrap();
    let user_name = unique_user_name("dup");

    let response = ctx
        .post_json(
            "/auth/register",
            json!({ "user_name": user_name, "password": "shinkansen8" }),
        )
        .await;
    expect_status(response, StatusCode::CREATED).await;

    let response = ctx
        .post_json(
            "/auth/register",
            json!({ "user_name": user_name, "password": "different-pw" }),
        )
        .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_register_validates_payload() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx
        .post_json(
            "/auth/register",
            json!({ "user_name": unique_user_name("weak"), "password": "short" }),
        )
        .await;
    expect_status(response, StatusCode::UNPROCESSABLE_ENTITY).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_vote_upsert_and_stats() {
    let mut ctx = TestContext::new().await.unwrap();
    let fact = create_test_fact(&ctx, 5).await.unwrap();

    let response = ctx
        .post_json(
            "/auth/register",
            json!({ "user_name": unique_user_name("voter"), "password": "shinkansen8" }),
        )
        .await;
    let user = expect_status(response, StatusCode::CREATED).await;
    let user_id = user["id"].as_i64().unwrap();

    // First vote inserts
    let response = ctx
        .post_json(
            "/vote/",
            json!({ "user_id": user_id, "common_sense_id": fact.id, "recognized": true }),
        )
        .await;
    let vote = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(vote["recognized"], true);
    let vote_id = vote["id"].as_i64().unwrap();

    // Second vote overwrites the same row
    let response = ctx
        .post_json(
            "/vote/",
            json!({ "user_id": user_id, "common_sense_id": fact.id, "recognized": false }),
        )
        .await;
    let vote = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(vote["id"].as_i64().unwrap(), vote_id);
    assert_eq!(vote["recognized"], false);

    // Stats reflect exactly one (now unrecognized) vote
    let response = ctx.get(&format!("/vote/stats/{}", fact.id)).await;
    let stats = expect_status(response, StatusCode::OK).await;
    assert_eq!(stats["common_sense_id"].as_i64().unwrap(), fact.id);
    assert_eq!(stats["known"], 0);
    assert_eq!(stats["unknown"], 1);

    // Check returns the stored vote
    let response = ctx
        .get(&format!(
            "/vote/check?user_id={}&common_sense_id={}",
            user_id, fact.id
        ))
        .await;
    let checked = expect_status(response, StatusCode::OK).await;
    assert_eq!(checked["recognized"], false);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_vote_check_missing_pair_is_404() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx
        .get("/vote/check?user_id=999999999&common_sense_id=999999999")
        .await;
    expect_status(response, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_vote_on_missing_fact_is_storage_error() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx
        .post_json(
            "/auth/register",
            json!({ "user_name": unique_user_name("fk"), "password": "shinkansen8" }),
        )
        .await;
    let user = expect_status(response, StatusCode::CREATED).await;

    let response = ctx
        .post_json(
            "/vote/",
            json!({
                "user_id": user["id"].as_i64().unwrap(),
                "common_sense_id": 999999999_i64,
                "recognized": true
            }),
        )
        .await;
    expect_status(response, StatusCode::INTERNAL_SERVER_ERROR).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_user_level_aggregation() {
    let mut ctx = TestContext::new().await.unwrap();
    let fact_a = create_test_fact(&ctx, 7).await.unwrap();
    let fact_b = create_test_fact(&ctx, 5).await.unwrap();
    let fact_c = create_test_fact(&ctx, 20).await.unwrap();

    let response = ctx
        .post_json(
            "/auth/register",
            json!({ "user_name": unique_user_name("level"), "password": "shinkansen8" }),
        )
        .await;
    let user = expect_status(response, StatusCode::CREATED).await;
    let user_id = user["id"].as_i64().unwrap();

    for (fact_id, recognized) in [(fact_a.id, true), (fact_b.id, true), (fact_c.id, false)] {
        let response = ctx
            .post_json(
                "/vote/",
                json!({ "user_id": user_id, "common_sense_id": fact_id, "recognized": recognized }),
            )
            .await;
        expect_status(response, StatusCode::CREATED).await;
    }

    // 7 + 5 recognized, the level-20 unrecognized fact contributes nothing
    let response = ctx.get(&format!("/auth/level/{}", user_id)).await;
    let level = expect_status(response, StatusCode::OK).await;
    assert_eq!(level["level_sum"], 12);
    assert_eq!(level["user_level"], 1);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_user_level_unknown_user_is_zero() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx.get("/auth/level/999999999").await;
    let level = expect_status(response, StatusCode::OK).await;
    assert_eq!(level["level_sum"], 0);
    assert_eq!(level["user_level"], 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_user_vote_listings() {
    let mut ctx = TestContext::new().await.unwrap();
    let fact = create_test_fact(&ctx, 3).await.unwrap();

    let response = ctx
        .post_json(
            "/auth/register",
            json!({ "user_name": unique_user_name("listing"), "password": "shinkansen8" }),
        )
        .await;
    let user = expect_status(response, StatusCode::CREATED).await;
    let user_id = user["id"].as_i64().unwrap();

    let response = ctx
        .post_json(
            "/vote/",
            json!({ "user_id": user_id, "common_sense_id": fact.id, "recognized": true }),
        )
        .await;
    expect_status(response, StatusCode::CREATED).await;

    let response = ctx.get(&format!("/vote/user/{}", user_id)).await;
    let facts = expect_status(response, StatusCode::OK).await;
    let facts = facts.as_array().unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0]["id"].as_i64().unwrap(), fact.id);

    let response = ctx.get(&format!("/vote/user/details/{}", user_id)).await;
    let details = expect_status(response, StatusCode::OK).await;
    let details = details.as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["common_sense_id"].as_i64().unwrap(), fact.id);
    assert_eq!(details[0]["title"], fact.title);
    assert_eq!(details[0]["recognized"], true);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_common_sense_listing_and_lookup() {
    let mut ctx = TestContext::new().await.unwrap();
    let fact = create_test_fact(&ctx, 1).await.unwrap();

    let response = ctx.get(&format!("/common_sense/{}", fact.id)).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["title"], fact.title);
    assert_eq!(body["genres"][0], "test");

    let response = ctx.get("/common_sense/999999999").await;
    expect_status(response, StatusCode::NOT_FOUND).await;

    let response = ctx.get("/common_sense/?skip=0&limit=5").await;
    let listed = expect_status(response, StatusCode::OK).await;
    assert!(listed.as_array().unwrap().len() <= 5);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_health_endpoint() {
    let mut ctx = TestContext::new().await.unwrap();

    let response = ctx.get("/health").await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert!(body["pool_size"].as_u64().unwrap() >= 1);
}
