//! Thin admin API.
//!
//! Content management happens over JSON: create an entity, delete one by id,
//! and publish pending testimonies. Every request must carry the configured
//! bearer token; with no token configured the whole surface refuses requests,
//! so an unconfigured deployment cannot be administered by accident.

use crate::error::SiteError;
use crate::models::*;
use crate::routes::AppState;
use crate::security::{bearer_token, token_matches};
use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, post};
use axum::{Json, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mass-schedules", post(create_mass_schedule))
        .route("/mass-schedules/:id", delete(delete_mass_schedule))
        .route("/homilies", post(create_homily))
        .route("/homilies/:id", delete(delete_homily))
        .route("/healing-prayers", post(create_healing_prayer))
        .route("/healing-prayers/:id", delete(delete_healing_prayer))
        .route("/events", post(create_event))
        .route("/events/:id", delete(delete_event))
        .route("/advertisements", post(create_advertisement))
        .route("/advertisements/:id", delete(delete_advertisement))
        .route("/rooms", post(create_room))
        .route("/rooms/:id", delete(delete_room))
        .route("/testimonies", post(create_testimony))
        .route("/testimonies/:id", delete(delete_testimony))
        .route("/testimonies/:id/publish", post(publish_testimony))
        .route("/gallery", post(create_gallery_item))
        .route("/gallery/:id", delete(delete_gallery_item))
        .route("/members", post(create_member))
        .route("/members/:id", delete(delete_member))
}

/// Reject anything without the configured bearer token. Comparison is
/// constant-time.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), SiteError> {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return Err(SiteError::Unauthorized);
    };
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .ok_or(SiteError::Unauthorized)?;

    if token_matches(expected, presented) {
        Ok(())
    } else {
        Err(SiteError::Unauthorized)
    }
}

fn created(id: i64) -> impl IntoResponse {
    (StatusCode::CREATED, Json(serde_json::json!({ "id": id })))
}

fn deleted(removed: bool) -> Result<StatusCode, SiteError> {
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(SiteError::NotFound)
    }
}

// ==================== Handlers ====================

async fn create_mass_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewMassSchedule>,
) -> Result<impl IntoResponse, SiteError> {
    authorize(&state, &headers)?;
    Ok(created(state.db.insert_mass_schedule(&payload)?))
}

async fn delete_mass_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    deleted(state.db.delete_mass_schedule(id)?)
}

async fn create_homily(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewHomily>,
) -> Result<impl IntoResponse, SiteError> {
    authorize(&state, &headers)?;
    Ok(created(state.db.insert_homily(&payload)?))
}

async fn delete_homily(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    deleted(state.db.delete_homily(id)?)
}

async fn create_healing_prayer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewHealingPrayer>,
) -> Result<impl IntoResponse, SiteError> {
    authorize(&state, &headers)?;
    Ok(created(state.db.insert_healing_prayer(&payload)?))
}

async fn delete_healing_prayer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    deleted(state.db.delete_healing_prayer(id)?)
}

async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewEvent>,
) -> Result<impl IntoResponse, SiteError> {
    authorize(&state, &headers)?;
    Ok(created(state.db.insert_event(&payload)?))
}

async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    deleted(state.db.delete_event(id)?)
}

async fn create_advertisement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewAdvertisement>,
) -> Result<impl IntoResponse, SiteError> {
    authorize(&state, &headers)?;
    Ok(created(state.db.insert_advertisement(&payload)?))
}

async fn delete_advertisement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    deleted(state.db.delete_advertisement(id)?)
}

async fn create_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewRoom>,
) -> Result<impl IntoResponse, SiteError> {
    authorize(&state, &headers)?;
    Ok(created(state.db.insert_room(&payload)?))
}

async fn delete_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    deleted(state.db.delete_room(id)?)
}

async fn create_testimony(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewTestimony>,
) -> Result<impl IntoResponse, SiteError> {
    authorize(&state, &headers)?;
    Ok(created(state.db.insert_testimony(&payload)?))
}

async fn delete_testimony(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    deleted(state.db.delete_testimony(id)?)
}

async fn publish_testimony(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    if state.db.publish_testimony(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(SiteError::NotFound)
    }
}

async fn create_gallery_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewGalleryItem>,
) -> Result<impl IntoResponse, SiteError> {
    authorize(&state, &headers)?;
    Ok(created(state.db.insert_gallery_item(&payload)?))
}

async fn delete_gallery_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    deleted(state.db.delete_gallery_item(id)?)
}

async fn create_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewMember>,
) -> Result<impl IntoResponse, SiteError> {
    authorize(&state, &headers)?;
    Ok(created(state.db.insert_member(&payload)?))
}

async fn delete_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, SiteError> {
    authorize(&state, &headers)?;
    deleted(state.db.delete_member(id)?)
}
