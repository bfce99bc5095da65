//! Integration tests for meals, workouts, profile and energy balance

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_log_meal_requires_auth() {
    let app = common::TestApp::new().await;

    let body = json!({ "calories": 500 });
    let (status, _) = app.post("/api/v1/meals", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_negative_calories_rejected() {
    let app = common::TestApp::new().await;
    let (_, token) = app.new_user();

    let body = json!({ "name": "Mystery", "calories": -10 });
    let (status, response) = app
        .post_auth("/api/v1/meals", &body.to_string(), &token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&response)["error"]["field"], "calories");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_round_trip_and_stored_target() {
    let app = common::TestApp::new().await;
    let (user_id, token) = app.new_user();

    let (status, _) = app.get_auth("/api/v1/profile", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = json!({
        "profile": {
            "sex": "male",
            "mass_kg": 90,
            "height_cm": 180,
            "age_years": 30,
            "activity_level": "moderately_active"
        },
        "goal": { "kind": "lose_weight", "target_mass_kg": 75 }
    });
    let (status, response) = app
        .put_auth("/api/v1/profile", &body.to_string(), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&response)["profile"]["activity_level"], "moderately_active");

    let (status, response) = app.get_auth("/api/v1/energy/target", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&response)["daily_calories"], 2414);

    app.cleanup_user(user_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_weekly_balance_with_backfill() {
    let app = common::TestApp::new().await;
    let (user_id, token) = app.new_user();
    let earlier = (Utc::now() - Duration::minutes(5)).to_rfc3339();

    let profile = json!({
        "profile": { "sex": "female", "mass_kg": 60, "height_cm": 165, "age_years": 40 }
    });
    app.put_auth("/api/v1/profile", &profile.to_string(), &token)
        .await;

    let meal = json!({
        "name": "Pasta",
        "meal_type": "dinner",
        "calories": 700,
        "macros": { "protein_g": 25, "carbs_g": 100, "fat_g": 18 },
        "consumed_at": earlier
    });
    let (status, _) = app
        .post_auth("/api/v1/meals", &meal.to_string(), &token)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // No calories: estimated as 10.0 MET * 60 kg * 0.5 h = 300
    let swim = json!({
        "exercise_name": "Lap swim",
        "duration_minutes": 30,
        "performed_at": earlier
    });
    let (status, _) = app
        .post_auth("/api/v1/workouts", &swim.to_string(), &token)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Planned workouts do not count until completed
    let planned = json!({
        "exercise_name": "Evening run",
        "status": "planned",
        "duration_minutes": 20,
        "calories_burned": 250,
        "performed_at": earlier
    });
    let (_, response) = app
        .post_auth("/api/v1/workouts", &planned.to_string(), &token)
        .await;
    let planned_id = parse(&response)["id"].as_str().unwrap().to_string();

    let (status, response) = app
        .get_auth("/api/v1/energy/balance?period=weekly", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let balance = parse(&response);
    assert_eq!(balance["summary"]["total_consumed"], 700.0);
    assert_eq!(balance["summary"]["total_burned"], 300.0);
    assert_eq!(balance["summary"]["net"], 400.0);
    assert_eq!(balance["buckets"].as_array().unwrap().len(), 4);
    assert!(balance["daily_target"]["daily_calories"].is_number());

    let status_change = json!({ "status": "completed" });
    let (status, _) = app
        .put_auth(
            &format!("/api/v1/workouts/{}/status", planned_id),
            &status_change.to_string(),
            &token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, response) = app
        .get_auth("/api/v1/energy/balance?period=weekly", &token)
        .await;
    assert_eq!(parse(&response)["summary"]["total_burned"], 550.0);

    app.cleanup_user(user_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_meal_is_scoped_to_owner() {
    let app = common::TestApp::new().await;
    let (owner_id, owner_token) = app.new_user();
    let (_, other_token) = app.new_user();

    let meal = json!({ "name": "Apple", "calories": 95 });
    let (_, response) = app
        .post_auth("/api/v1/meals", &meal.to_string(), &owner_token)
        .await;
    let meal_id = parse(&response)["id"].as_str().unwrap().to_string();
    let path = format!("/api/v1/meals/{}", meal_id);

    let (status, _) = app.delete_auth(&path, &other_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, response) = app.delete_auth(&path, &owner_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&response)["deleted"], true);

    app.cleanup_user(owner_id).await;
}
