// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::TestApp;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};
use xtaze::domain::models::user::UserRole;

fn track_form(title: &str, genres: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("genres", genres.to_string())
        .add_part(
            "audio",
            Part::bytes(vec![0xFF, 0xFB, 0x90, 0x00])
                .file_name("song.mp3")
                .mime_type("audio/mpeg"),
        )
        .add_part(
            "image",
            Part::bytes(vec![0x89, 0x50, 0x4E, 0x47])
                .file_name("cover.png")
                .mime_type("image/png"),
        )
}

#[tokio::test]
async fn test_upload_track_stores_files_and_normalizes_genres() {
    let app = TestApp::spawn().await;
    app.seed_genre("rock").await;
    app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let token = app.login("artist", "artist@xtaze.test").await;

    let response = app
        .server
        .post("/artist/tracks")
        .authorization_bearer(&token)
        .multipart(track_form("First Light", "ROCK, rock"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "First Light");
    assert_eq!(body["data"]["genres"], json!(["Rock"]));
    assert_eq!(app.storage.object_count().await, 2);

    let mine: Value = app.server.get("/artist/tracks").authorization_bearer(&token).await.json();
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_upload_track_rejects_unknown_genre_and_missing_audio() {
    let app = TestApp::spawn().await;
    app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let token = app.login("artist", "artist@xtaze.test").await;

    let unknown = app
        .server
        .post("/artist/tracks")
        .authorization_bearer(&token)
        .multipart(track_form("Lost", "polka"))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::BAD_REQUEST);

    let no_audio = app
        .server
        .post("/artist/tracks")
        .authorization_bearer(&token)
        .multipart(MultipartForm::new().add_text("title", "Silent").add_text("genres", "rock"))
        .await;
    assert_eq!(no_audio.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.storage.object_count().await, 0);
}

#[tokio::test]
async fn test_artist_cannot_touch_foreign_tracks() {
    let app = TestApp::spawn().await;
    let owner = app.seed_user("owner@xtaze.test", UserRole::Artist).await;
    let track = app.seed_track(owner.id, "Mine").await;
    app.seed_user("rival@xtaze.test", UserRole::Artist).await;
    let rival = app.login("artist", "rival@xtaze.test").await;

    let response = app
        .server
        .delete(&format!("/artist/tracks/{}", track.id))
        .authorization_bearer(&rival)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "You do not own this track");
}

#[tokio::test]
async fn test_payout_without_plays_is_rejected() {
    let app = TestApp::spawn().await;
    let artist = app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    app.seed_track(artist.id, "Unheard").await;
    let token = app.login("artist", "artist@xtaze.test").await;

    let response = app.server.post("/artist/payout").authorization_bearer(&token).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "No revenue to payout for this month");
}

/// 提现金额 = 当月播放数 * 每次播放 50 美分
#[tokio::test]
async fn test_payout_charges_monthly_plays() {
    let app = TestApp::spawn().await;
    let artist = app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let track = app.seed_track(artist.id, "Hit").await;
    app.seed_user("fan@xtaze.test", UserRole::User).await;
    let fan = app.login("user", "fan@xtaze.test").await;
    for _ in 0..3 {
        app.server
            .post(&format!("/api/songs/{}/play", track.id))
            .authorization_bearer(&fan)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains("unit_amount%5D=150"))
        .and(body_string_contains("metadata%5Bkind%5D=payout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_payout_1",
            "url": "https://checkout.stripe.test/cs_payout_1",
            "amount_total": 150
        })))
        .expect(1)
        .mount(&app.external)
        .await;

    let token = app.login("artist", "artist@xtaze.test").await;
    let response = app.server.post("/artist/payout").authorization_bearer(&token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["sessionId"], "cs_payout_1");
    assert_eq!(body["data"]["amount"], 150);
    assert_eq!(body["data"]["monthlyPlays"], 3);

    let revenue: Value = app
        .server
        .get("/artist/monetization")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(revenue["data"]["monthlyPlays"], 3);
}

#[tokio::test]
async fn test_verification_cannot_be_resubmitted_while_pending() {
    let app = TestApp::spawn().await;
    app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let token = app.login("artist", "artist@xtaze.test").await;
    let document = || {
        MultipartForm::new().add_part(
            "document",
            Part::bytes(vec![0x25, 0x50, 0x44, 0x46])
                .file_name("id.pdf")
                .mime_type("application/pdf"),
        )
    };

    let status: Value = app
        .server
        .get("/artist/verification")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(status["data"]["status"], "unsubmitted");

    let first = app
        .server
        .post("/artist/verification")
        .authorization_bearer(&token)
        .multipart(document())
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let again = app
        .server
        .post("/artist/verification")
        .authorization_bearer(&token)
        .multipart(document())
        .await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);
}
