//! Integration tests for the parish site.
//!
//! These tests build the real router over a temporary database and drive it
//! in-process, covering the language/session flow, list pagination, detail
//! 404s, and the admin API.

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, REFERER, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

use parish_site::config::Config;
use parish_site::db::Database;
use parish_site::models::*;
use parish_site::render;
use parish_site::routes::{self, AppState};
use parish_site::session::SessionStore;

const ADMIN_TOKEN: &str = "test-admin-token";

// ==================== Test Helpers ====================

/// Build the application over a fresh temporary database.
fn create_test_app() -> (Router, Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test_site.db");
    let db = Database::new(db_path.to_str().unwrap()).expect("Failed to create database");

    let config = Config {
        database_path: db_path.to_str().unwrap().to_string(),
        port: 0,
        admin_token: Some(ADMIN_TOKEN.to_string()),
        media_base_url: "/media".to_string(),
    };

    let state = AppState {
        config: Arc::new(config),
        db: db.clone(),
        sessions: SessionStore::new(),
        templates: Arc::new(render::load_templates().expect("Templates should load")),
    };

    (routes::router(state), db, temp_dir)
}

fn schedule(n: u32) -> NewMassSchedule {
    NewMassSchedule {
        date: "2026-08-09".into(),
        start_time: "08:00".into(),
        end_time: "09:00".into(),
        mass_type: MassType::Morning,
        title: LocalizedText::uniform(&format!("Schedule {n}")),
        description: LocalizedText::default(),
    }
}

fn sample_event() -> NewEvent {
    NewEvent {
        event_date: "2026-09-12".into(),
        start_time: "10:00".into(),
        end_time: "12:00".into(),
        title: LocalizedText::uniform("Community Prayer Gathering"),
        description: LocalizedText::uniform("A parish gathering in faith and fellowship."),
        image: None,
    }
}

async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Pull the `sid=` cookie pair out of a response, ready for a Cookie header.
fn session_cookie_pair(response: &Response<Body>) -> String {
    let raw = response
        .headers()
        .get(SET_COOKIE)
        .expect("Response should set the session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

// ==================== Home Page Tests ====================

#[tokio::test]
async fn test_home_renders_in_english_by_default() {
    let (app, _db, _tmp) = create_test_app();
    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Mass Schedule"));
    assert!(body.contains("Homilies"));
}

#[tokio::test]
async fn test_first_visit_sets_session_cookie() {
    let (app, _db, _tmp) = create_test_app();
    let response = get(&app, "/").await;
    let cookie = session_cookie_pair(&response);
    assert!(cookie.starts_with("sid="));
}

#[tokio::test]
async fn test_home_shows_latest_content() {
    let (app, db, _tmp) = create_test_app();
    db.insert_event(&sample_event()).unwrap();
    db.insert_testimony(&NewTestimony {
        author_name: "Agnes".into(),
        content: LocalizedText::uniform("I found peace here."),
        status: TestimonyStatus::Published,
    })
    .unwrap();

    let body = body_text(get(&app, "/").await).await;
    assert!(body.contains("Community Prayer Gathering"));
    assert!(body.contains("I found peace here."));
}

// ==================== Pagination Tests ====================

#[tokio::test]
async fn test_mass_schedule_page_two_shows_the_right_slice() {
    let (app, db, _tmp) = create_test_app();
    // 25 schedules at 12 per page; newest insertion first, so page 2 holds
    // the 13th through 24th newest: Schedule 13 down to Schedule 2.
    for n in 1..=25 {
        db.insert_mass_schedule(&schedule(n)).unwrap();
    }

    let body = body_text(get(&app, "/mass-schedule?page=2").await).await;
    assert!(body.contains("Schedule 13"));
    assert!(body.contains("Schedule 2<"));
    assert!(!body.contains("Schedule 25"));
    assert!(!body.contains("Schedule 1<"));
}

#[tokio::test]
async fn test_pagination_window_links() {
    let (app, db, _tmp) = create_test_app();
    for n in 1..=25 {
        db.insert_mass_schedule(&schedule(n)).unwrap();
    }

    // 3 pages total, current 2: window is 1..=3.
    let body = body_text(get(&app, "/mass-schedule?page=2").await).await;
    assert!(body.contains(r#"<a href="?page=1">1</a>"#));
    assert!(body.contains(r#"<span class="page-current">2</span>"#));
    assert!(body.contains(r#"<a href="?page=3">3</a>"#));
}

#[tokio::test]
async fn test_non_numeric_page_behaves_like_page_one() {
    let (app, db, _tmp) = create_test_app();
    for n in 1..=25 {
        db.insert_mass_schedule(&schedule(n)).unwrap();
    }

    let garbage = body_text(get(&app, "/mass-schedule?page=abc").await).await;
    let first = body_text(get(&app, "/mass-schedule?page=1").await).await;
    assert_eq!(garbage, first);
}

#[tokio::test]
async fn test_overlarge_page_clamps_to_last() {
    let (app, db, _tmp) = create_test_app();
    for n in 1..=25 {
        db.insert_mass_schedule(&schedule(n)).unwrap();
    }

    let body = body_text(get(&app, "/mass-schedule?page=99").await).await;
    // Last page holds the single oldest schedule.
    assert!(body.contains("Schedule 1<"));
    assert!(!body.contains("Schedule 13"));
}

#[tokio::test]
async fn test_empty_list_renders_single_page() {
    let (app, _db, _tmp) = create_test_app();
    let response = get(&app, "/events?page=5").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Nothing here yet."));
    // One page only: no pagination nav is rendered.
    assert!(!body.contains("page-current"));
}

// ==================== Language Tests ====================

#[tokio::test]
async fn test_change_language_redirects_to_referer() {
    let (app, _db, _tmp) = create_test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/change-language/fr")
                .header(REFERER, "/events?page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(LOCATION).unwrap().to_str().unwrap(),
        "/events?page=2"
    );
}

#[tokio::test]
async fn test_change_language_without_referer_goes_home() {
    let (app, _db, _tmp) = create_test_app();
    let response = get(&app, "/change-language/fr").await;
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(LOCATION).unwrap().to_str().unwrap(),
        "/"
    );
}

#[tokio::test]
async fn test_chosen_language_persists_across_requests() {
    let (app, _db, _tmp) = create_test_app();
    let response = get(&app, "/change-language/fr").await;
    let cookie = session_cookie_pair(&response);

    let body = body_text(get_with_cookie(&app, "/", &cookie).await).await;
    assert!(body.contains("Accueil"));
    assert!(body.contains("Horaire des messes"));
}

#[tokio::test]
async fn test_unknown_language_code_coerces_to_english() {
    let (app, _db, _tmp) = create_test_app();
    let response = get(&app, "/change-language/XX").await;
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(LOCATION).unwrap().to_str().unwrap(),
        "/"
    );
    let cookie = session_cookie_pair(&response);

    let body = body_text(get_with_cookie(&app, "/", &cookie).await).await;
    assert!(body.contains("Mass Schedule"));
    assert!(!body.contains("Horaire des messes"));
}

#[tokio::test]
async fn test_language_codes_are_case_insensitive() {
    let (app, _db, _tmp) = create_test_app();
    let response = get(&app, "/change-language/SW").await;
    let cookie = session_cookie_pair(&response);

    let body = body_text(get_with_cookie(&app, "/", &cookie).await).await;
    assert!(body.contains("Ratiba ya Misa"));
}

#[tokio::test]
async fn test_blank_translation_falls_back_to_english() {
    let (app, db, _tmp) = create_test_app();
    let mut event = sample_event();
    event.title = LocalizedText {
        en: "Mass Today".into(),
        fr: String::new(),
        rw: String::new(),
        sw: String::new(),
    };
    db.insert_event(&event).unwrap();

    let response = get(&app, "/change-language/rw").await;
    let cookie = session_cookie_pair(&response);

    let body = body_text(get_with_cookie(&app, "/events", &cookie).await).await;
    assert!(body.contains("Mass Today"));
}

// ==================== Detail Page Tests ====================

#[tokio::test]
async fn test_event_details_renders() {
    let (app, db, _tmp) = create_test_app();
    let id = db.insert_event(&sample_event()).unwrap();

    let response = get(&app, &format!("/events/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Community Prayer Gathering"));
}

#[tokio::test]
async fn test_missing_event_is_404() {
    let (app, _db, _tmp) = create_test_app();
    let response = get(&app, "/events/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_room_details_with_related_rooms() {
    let (app, db, _tmp) = create_test_app();
    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(
            db.insert_room(&NewRoom {
                title: format!("Room {i}"),
                location: "Kigali".into(),
                description: "A quiet room".into(),
                price_per_night: 60.0,
                amenities: vec!["Free WiFi".into()],
                images: vec![],
            })
            .unwrap(),
        );
    }

    let response = get(&app, &format!("/room/{}", ids[0])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Room 0"));
    assert!(body.contains("Free WiFi"));
    assert!(body.contains("Other rooms you may like"));
}

#[tokio::test]
async fn test_missing_room_is_404() {
    let (app, _db, _tmp) = create_test_app();
    let response = get(&app, "/room/424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ==================== Testimony Visibility Tests ====================

#[tokio::test]
async fn test_testimonies_page_hides_pending_entries() {
    let (app, db, _tmp) = create_test_app();
    db.insert_testimony(&NewTestimony {
        author_name: "Jean".into(),
        content: LocalizedText::uniform("Published words."),
        status: TestimonyStatus::Published,
    })
    .unwrap();
    db.insert_testimony(&NewTestimony {
        author_name: "Divine".into(),
        content: LocalizedText::uniform("Still waiting for review."),
        status: TestimonyStatus::Pending,
    })
    .unwrap();

    let body = body_text(get(&app, "/testimonies").await).await;
    assert!(body.contains("Published words."));
    assert!(!body.contains("Still waiting for review."));
}

// ==================== Admin API Tests ====================

async fn admin_post(app: &Router, uri: &str, token: Option<&str>, json: &str) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(builder.body(Body::from(json.to_string())).unwrap())
        .await
        .unwrap()
}

async fn admin_delete(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

const EVENT_JSON: &str = r#"{
    "event_date": "2026-10-01",
    "start_time": "14:00",
    "end_time": "16:00",
    "title": {"en": "Lenten Reflection Seminar"},
    "description": {"en": "An afternoon of quiet reflection."}
}"#;

#[tokio::test]
async fn test_admin_requires_token() {
    let (app, _db, _tmp) = create_test_app();
    let response = admin_post(&app, "/admin/events", None, EVENT_JSON).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = admin_post(&app, "/admin/events", Some("wrong-token"), EVENT_JSON).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_create_and_delete_event() {
    let (app, db, _tmp) = create_test_app();

    let response = admin_post(&app, "/admin/events", Some(ADMIN_TOKEN), EVENT_JSON).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("Should return JSON");
    let id = created["id"].as_i64().expect("Should include the new id");

    let event = db.get_event(id).unwrap().expect("Event should exist");
    assert_eq!(event.title.en, "Lenten Reflection Seminar");
    // Variants the payload left out are blank and will fall back to English.
    assert_eq!(event.title.rw, "");

    let response = admin_delete(&app, &format!("/admin/events/{id}"), Some(ADMIN_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = admin_delete(&app, &format!("/admin/events/{id}"), Some(ADMIN_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_publish_testimony() {
    let (app, db, _tmp) = create_test_app();
    let id = db
        .insert_testimony(&NewTestimony {
            author_name: "Patrick".into(),
            content: LocalizedText::uniform("Waiting for moderation."),
            status: TestimonyStatus::Pending,
        })
        .unwrap();

    let response = admin_post(
        &app,
        &format!("/admin/testimonies/{id}/publish"),
        Some(ADMIN_TOKEN),
        "",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let published = db.published_testimonies().unwrap();
    assert_eq!(published.len(), 1);
}

#[tokio::test]
async fn test_admin_disabled_without_configured_token() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("no_admin.db");
    let db = Database::new(db_path.to_str().unwrap()).unwrap();

    let state = AppState {
        config: Arc::new(Config {
            database_path: db_path.to_str().unwrap().to_string(),
            port: 0,
            admin_token: None,
            media_base_url: "/media".to_string(),
        }),
        db,
        sessions: SessionStore::new(),
        templates: Arc::new(render::load_templates().unwrap()),
    };
    let app = routes::router(state);

    // Even a "correct-looking" token is refused when none is configured.
    let response = admin_post(&app, "/admin/events", Some(ADMIN_TOKEN), EVENT_JSON).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
