// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::TestApp;
use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};
use xtaze::domain::models::user::UserRole;
use xtaze::domain::repositories::track_repository::TrackRepository;

/// 同一听众重复播放：听众集合不重复，播放计数逐次累加
#[tokio::test]
async fn test_play_increment_counts_plays_and_unique_listeners() {
    let app = TestApp::spawn().await;
    let artist = app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let track = app.seed_track(artist.id, "Night Drive").await;
    app.seed_user("a@xtaze.test", UserRole::User).await;
    app.seed_user("b@xtaze.test", UserRole::User).await;
    let alice = app.login("user", "a@xtaze.test").await;
    let bob = app.login("user", "b@xtaze.test").await;
    let play = format!("/api/songs/{}/play", track.id);

    for _ in 0..2 {
        let response = app.server.post(&play).authorization_bearer(&alice).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
    let response = app.server.post(&play).authorization_bearer(&bob).await;
    let body: Value = response.json();

    assert_eq!(body["data"]["listeners"], 2);
    assert_eq!(body["data"]["totalPlays"], 3);
    assert_eq!(body["data"]["monthlyPlays"], 3);

    let stored = app.tracks.find_by_id(track.id).await.unwrap().unwrap();
    assert_eq!(stored.listeners.len(), 2);
}

#[tokio::test]
async fn test_play_requires_token_and_existing_track() {
    let app = TestApp::spawn().await;
    app.seed_user("a@xtaze.test", UserRole::User).await;
    let token = app.login("user", "a@xtaze.test").await;

    let anonymous = app
        .server
        .post(&format!("/api/songs/{}/play", Uuid::new_v4()))
        .await;
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);

    let missing = app
        .server
        .post(&format!("/api/songs/{}/play", Uuid::new_v4()))
        .authorization_bearer(&token)
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_like_toggles_and_lists_liked_songs() {
    let app = TestApp::spawn().await;
    let artist = app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let track = app.seed_track(artist.id, "Morning").await;
    app.seed_user("fan@xtaze.test", UserRole::User).await;
    let token = app.login("user", "fan@xtaze.test").await;
    let like = format!("/user/tracks/{}/like", track.id);

    let body: Value = app.server.post(&like).authorization_bearer(&token).await.json();
    assert_eq!(body["data"]["liked"], true);

    let liked: Value = app.server.get("/user/liked-songs").authorization_bearer(&token).await.json();
    assert_eq!(liked["data"][0]["id"], track.id.to_string());

    let body: Value = app.server.post(&like).authorization_bearer(&token).await.json();
    assert_eq!(body["data"]["liked"], false);

    let liked: Value = app.server.get("/user/liked-songs").authorization_bearer(&token).await.json();
    assert_eq!(liked["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_playlist_rejects_duplicate_tracks_and_foreign_owner() {
    let app = TestApp::spawn().await;
    let artist = app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    let track = app.seed_track(artist.id, "Loop").await;
    app.seed_user("owner@xtaze.test", UserRole::User).await;
    app.seed_user("other@xtaze.test", UserRole::User).await;
    let owner = app.login("user", "owner@xtaze.test").await;
    let other = app.login("user", "other@xtaze.test").await;

    let created = app
        .server
        .post("/user/playlists")
        .authorization_bearer(&owner)
        .json(&json!({ "name": "Focus" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let body: Value = created.json();
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();
    let tracks = format!("/user/playlists/{}/tracks", playlist_id);

    let added = app
        .server
        .post(&tracks)
        .authorization_bearer(&owner)
        .json(&json!({ "trackId": track.id }))
        .await;
    assert_eq!(added.status_code(), StatusCode::OK);

    let duplicate = app
        .server
        .post(&tracks)
        .authorization_bearer(&owner)
        .json(&json!({ "trackId": track.id }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let foreign = app
        .server
        .delete(&format!("/user/playlists/{}", playlist_id))
        .authorization_bearer(&other)
        .await;
    assert_eq!(foreign.status_code(), StatusCode::FORBIDDEN);

    let detail: Value = app
        .server
        .get(&format!("/user/playlists/{}", playlist_id))
        .authorization_bearer(&owner)
        .await
        .json();
    assert_eq!(detail["data"]["trackDetails"][0]["title"], "Loop");
}

#[tokio::test]
async fn test_search_finds_tracks_by_title() {
    let app = TestApp::spawn().await;
    let artist = app.seed_user("artist@xtaze.test", UserRole::Artist).await;
    app.seed_track(artist.id, "Blue Horizon").await;
    app.seed_track(artist.id, "Red Sky").await;
    app.seed_user("fan@xtaze.test", UserRole::User).await;
    let token = app.login("user", "fan@xtaze.test").await;

    let body: Value = app
        .server
        .get("/user/search")
        .add_query_param("q", "Horizon")
        .authorization_bearer(&token)
        .await
        .json();

    let tracks = body["data"]["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["title"], "Blue Horizon");
}

#[tokio::test]
async fn test_deezer_previews_are_proxied() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/chart/0/tracks"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": 1,
                    "title": "Preview One",
                    "preview": "https://cdn.deezer.test/1.mp3",
                    "duration": 180,
                    "artist": {"id": 10, "name": "Artist One"},
                    "album": {"id": 100, "title": "Album One", "cover_medium": "https://cdn.deezer.test/1.jpg"}
                },
                {
                    "id": 2,
                    "title": "No Preview",
                    "preview": "",
                    "duration": 200,
                    "artist": {"id": 11, "name": "Artist Two"},
                    "album": {"id": 101, "title": "Album Two"}
                }
            ]
        })))
        .expect(1)
        .mount(&app.external)
        .await;

    let response = app
        .server
        .get("/api/songs/deezer")
        .add_query_param("limit", 2)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let previews = body["data"].as_array().unwrap();
    assert_eq!(previews.len(), 1);
    assert_eq!(previews[0]["title"], "Preview One");
    assert_eq!(previews[0]["artist"], "Artist One");
    assert_eq!(previews[0]["previewUrl"], "https://cdn.deezer.test/1.mp3");
}

#[tokio::test]
async fn test_deezer_outage_maps_to_bad_gateway() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/chart/0/tracks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.external)
        .await;

    let response = app.server.get("/api/songs/deezer").await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_public_genres_hide_blocked() {
    let app = TestApp::spawn().await;
    app.seed_genre("Jazz").await;
    let mut blocked = app.seed_genre("Noise").await;
    blocked.is_blocked = true;
    {
        use xtaze::domain::repositories::genre_repository::GenreRepository;
        app.genres.update(&blocked).await.unwrap();
    }

    let body: Value = app.server.get("/api/songs/genres").await.json();

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|g| g["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Jazz"]);
}
