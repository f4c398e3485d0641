//! Public site routes.
//!
//! Each list handler follows the same shape: resolve the request's language
//! from the session, fetch the ordered collection from the repository,
//! paginate it, and render. The language is explicit context threaded through
//! every call; nothing locale-dependent lives in globals.

use crate::admin;
use crate::config::Config;
use crate::db::Database;
use crate::error::SiteError;
use crate::i18n::{strings, Language, ALL_LANGUAGES};
use crate::models::{
    Advertisement, Event, GalleryItem, HealingPrayer, Homily, MassSchedule, MassType, Member,
    Room, Testimony,
};
use crate::pagination::{paginate, Page};
use crate::session::{session_cookie, session_id_from_headers, SessionStore};
use axum::extract::{Path, Query, Request, State};
use axum::http::header::{HeaderValue, REFERER, SET_COOKIE};
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::{Html, Redirect, Response};
use axum::routing::get;
use axum::{Extension, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Tera;
use tower_http::trace::TraceLayer;

/// Session key holding the chosen language code.
const SESSION_LANG_KEY: &str = "lang";

/// Items per page, per list view.
const SCHEDULES_PER_PAGE: usize = 12;
const HOMILIES_PER_PAGE: usize = 6;
const PRAYERS_PER_PAGE: usize = 12;
const EVENTS_PER_PAGE: usize = 12;
const ROOMS_PER_PAGE: usize = 12;

/// How many of each entity the home page shows.
const HOME_TEASER_COUNT: usize = 4;
const HOME_GALLERY_COUNT: usize = 6;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub sessions: SessionStore,
    pub templates: Arc<Tera>,
}

/// Session id for the current request, placed in request extensions by
/// [`session_middleware`].
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Raw `?page=` value; parsing and clamping happen in the paginator.
    pub page: Option<String>,
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/mass-schedule", get(mass_schedule))
        .route("/homilies", get(homilies))
        .route("/healing-prayers", get(healing_prayers))
        .route("/events", get(events))
        .route("/events/:id", get(event_details))
        .route("/rooms", get(rooms))
        .route("/room/:id", get(room_details))
        .route("/testimonies", get(testimonies))
        .route("/members", get(members))
        .route("/gallery", get(gallery))
        .route("/donate", get(donate))
        .route("/change-language/:code", get(change_language))
        .nest("/admin", admin::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Guarantee every request carries a usable session, and hand the session id
/// to handlers through request extensions. Newly created sessions get their
/// cookie set on the way out.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let candidate = session_id_from_headers(request.headers());
    let (session_id, created) = state.sessions.ensure(candidate.as_deref());
    request
        .extensions_mut()
        .insert(SessionId(session_id.clone()));

    let mut response = next.run(request).await;

    if created {
        if let Ok(value) = HeaderValue::from_str(&session_cookie(&session_id)) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

/// Where the change-language action sends the user afterwards: back to the
/// page they came from, or the home page when there is no referer.
pub fn redirect_target(referer: Option<&str>) -> String {
    referer.unwrap_or("/").to_string()
}

// ==================== Handlers ====================

/// Store the chosen language in the session and bounce the user back to
/// where they came from. Unknown codes quietly become English.
async fn change_language(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> Redirect {
    let lang = Language::resolve(Some(&code));
    state.sessions.set(&session.0, SESSION_LANG_KEY, lang.code());

    let referer = headers.get(REFERER).and_then(|v| v.to_str().ok());
    Redirect::to(&redirect_target(referer))
}

/// Home page: a teaser of everything.
async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let schedules = state.db.latest_mass_schedules(HOME_TEASER_COUNT)?;
    let homilies = state.db.latest_homilies(HOME_TEASER_COUNT)?;
    let events = state.db.latest_events(HOME_TEASER_COUNT)?;
    let adverts = state.db.latest_advertisements(HOME_TEASER_COUNT)?;
    let rooms = state.db.random_rooms(HOME_TEASER_COUNT, None)?;
    let testimonies = state.db.latest_published_testimonies(HOME_TEASER_COUNT)?;
    let gallery = state.db.latest_gallery(HOME_GALLERY_COUNT)?;
    let priests = state.db.members_with_role("Priest", HOME_TEASER_COUNT)?;
    let prayers = state.db.latest_healing_prayers(HOME_TEASER_COUNT)?;

    ctx.insert("schedules", &views(&schedules, |s| schedule_view(s, lang)));
    ctx.insert("homilies", &views(&homilies, |h| homily_view(h, lang, &state)));
    ctx.insert("events", &views(&events, |e| event_view(e, lang, &state)));
    ctx.insert("adverts", &views(&adverts, |a| advert_view(a, lang, &state)));
    ctx.insert("rooms", &views(&rooms, room_view));
    ctx.insert("testimonies", &views(&testimonies, |t| testimony_view(t, lang)));
    ctx.insert("gallery", &views(&gallery, |g| gallery_view(g, lang, &state)));
    ctx.insert("priests", &views(&priests, |m| member_view(m, &state)));
    ctx.insert("healing_prayers", &views(&prayers, |p| prayer_view(p, lang, &state)));

    Ok(Html(state.templates.render("pages/index.html", &ctx)?))
}

async fn mass_schedule(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let all = state.db.list_mass_schedules()?;
    let page = paginate(all, SCHEDULES_PER_PAGE, query.page.as_deref());

    ctx.insert("schedules", &views(&page.items, |s| schedule_view(s, lang)));
    insert_page_meta(&mut ctx, &page);
    Ok(Html(state.templates.render("pages/mass-schedule.html", &ctx)?))
}

async fn homilies(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let all = state.db.list_homilies()?;
    let page = paginate(all, HOMILIES_PER_PAGE, query.page.as_deref());

    ctx.insert("homilies", &views(&page.items, |h| homily_view(h, lang, &state)));
    insert_page_meta(&mut ctx, &page);
    Ok(Html(state.templates.render("pages/homilies.html", &ctx)?))
}

async fn healing_prayers(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let all = state.db.list_healing_prayers()?;
    let page = paginate(all, PRAYERS_PER_PAGE, query.page.as_deref());

    ctx.insert("prayers", &views(&page.items, |p| prayer_view(p, lang, &state)));
    insert_page_meta(&mut ctx, &page);
    Ok(Html(state.templates.render("pages/healing-prayers.html", &ctx)?))
}

async fn events(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let all = state.db.list_events()?;
    let page = paginate(all, EVENTS_PER_PAGE, query.page.as_deref());

    ctx.insert("events", &views(&page.items, |e| event_view(e, lang, &state)));
    insert_page_meta(&mut ctx, &page);
    Ok(Html(state.templates.render("pages/events/index.html", &ctx)?))
}

/// Single event; unknown ids are a 404.
async fn event_details(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let event = state.db.get_event(id)?.ok_or(SiteError::NotFound)?;
    ctx.insert("event", &event_view(&event, lang, &state));
    Ok(Html(state.templates.render("pages/events/show.html", &ctx)?))
}

async fn rooms(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let all = state.db.list_rooms()?;
    let page = paginate(all, ROOMS_PER_PAGE, query.page.as_deref());

    ctx.insert("rooms", &views(&page.items, room_view));
    insert_page_meta(&mut ctx, &page);
    Ok(Html(state.templates.render("pages/rooms/index.html", &ctx)?))
}

/// Single room with its images, amenities, and a short strip of other rooms.
async fn room_details(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let room = state.db.get_room(id)?.ok_or(SiteError::NotFound)?;
    let images = state.db.room_images(id)?;
    let amenities = state.db.room_amenities(id)?;
    let related = state.db.random_rooms(3, Some(id))?;

    ctx.insert("room", &room_view(&room));
    ctx.insert(
        "images",
        &images
            .iter()
            .map(|i| {
                serde_json::json!({
                    "url": media_url(&state, &i.image),
                    "alt_text": i.alt_text,
                })
            })
            .collect::<Vec<_>>(),
    );
    ctx.insert("amenities", &amenities.iter().map(|a| a.name.clone()).collect::<Vec<_>>());
    ctx.insert("related_rooms", &views(&related, room_view));
    Ok(Html(state.templates.render("pages/rooms/show.html", &ctx)?))
}

async fn testimonies(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let all = state.db.published_testimonies()?;
    ctx.insert("testimonies", &views(&all, |t| testimony_view(t, lang)));
    Ok(Html(state.templates.render("pages/testimonies.html", &ctx)?))
}

async fn members(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let all = state.db.list_members()?;
    ctx.insert("members", &views(&all, |m| member_view(m, &state)));
    Ok(Html(state.templates.render("pages/members.html", &ctx)?))
}

async fn gallery(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let mut ctx = base_context(&state, lang);

    let all = state.db.list_gallery()?;
    ctx.insert("gallery", &views(&all, |g| gallery_view(g, lang, &state)));
    Ok(Html(state.templates.render("pages/gallery.html", &ctx)?))
}

async fn donate(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, SiteError> {
    let lang = request_language(&state, &session);
    let ctx = base_context(&state, lang);
    Ok(Html(state.templates.render("pages/donate.html", &ctx)?))
}

// ==================== Context helpers ====================

/// The request's language: whatever the session holds, coerced to a
/// supported language.
fn request_language(state: &AppState, session: &SessionId) -> Language {
    Language::resolve(state.sessions.get(&session.0, SESSION_LANG_KEY).as_deref())
}

/// Context every page starts from: language, chrome strings, and the
/// language switcher entries.
fn base_context(state: &AppState, lang: Language) -> tera::Context {
    let mut ctx = tera::Context::new();
    ctx.insert("lang", lang.code());
    ctx.insert("ui", strings::for_language(lang));

    let languages: Vec<_> = ALL_LANGUAGES
        .iter()
        .map(|l| {
            serde_json::json!({
                "code": l.code(),
                "native_name": l.native_name(),
                "active": *l == lang,
            })
        })
        .collect();
    ctx.insert("languages", &languages);
    ctx.insert("media_base_url", &state.config.media_base_url);
    ctx
}

fn insert_page_meta<T>(ctx: &mut tera::Context, page: &Page<T>) {
    ctx.insert("page_number", &page.number);
    ctx.insert("total_pages", &page.total_pages);
    ctx.insert("page_range", &page.window().collect::<Vec<_>>());
    ctx.insert("has_previous", &page.has_previous());
    ctx.insert("has_next", &page.has_next());
    ctx.insert("previous_page", &page.number.saturating_sub(1).max(1));
    ctx.insert("next_page", &(page.number + 1).min(page.total_pages));
}

fn media_url(state: &AppState, stored_path: &str) -> String {
    format!(
        "{}/{}",
        state.config.media_base_url.trim_end_matches('/'),
        stored_path.trim_start_matches('/')
    )
}

fn views<T, V, F: Fn(&T) -> V>(items: &[T], f: F) -> Vec<V> {
    items.iter().map(f).collect()
}

// ==================== View structs ====================
//
// Templates only ever see already-localized text: the language is applied
// here, once, when the view is built.

#[derive(Debug, Serialize)]
struct ScheduleView {
    id: i64,
    date: String,
    start_time: String,
    end_time: String,
    mass_type_label: &'static str,
    title: String,
    description: String,
}

fn schedule_view(schedule: &MassSchedule, lang: Language) -> ScheduleView {
    let ui = strings::for_language(lang);
    ScheduleView {
        id: schedule.id,
        date: schedule.date.clone(),
        start_time: schedule.start_time.clone(),
        end_time: schedule.end_time.clone(),
        mass_type_label: match schedule.mass_type {
            MassType::Morning => ui.morning_mass,
            MassType::Evening => ui.evening_mass,
        },
        title: schedule.title.get(lang).to_string(),
        description: schedule.description.get(lang).to_string(),
    }
}

#[derive(Debug, Serialize)]
struct ArticleView {
    id: i64,
    published_at: String,
    title: String,
    content: String,
    image_url: Option<String>,
}

fn homily_view(homily: &Homily, lang: Language, state: &AppState) -> ArticleView {
    ArticleView {
        id: homily.id,
        published_at: homily.published_at.clone(),
        title: homily.title.get(lang).to_string(),
        content: homily.content.get(lang).to_string(),
        image_url: homily.image.as_deref().map(|p| media_url(state, p)),
    }
}

fn prayer_view(prayer: &HealingPrayer, lang: Language, state: &AppState) -> ArticleView {
    ArticleView {
        id: prayer.id,
        published_at: prayer.created_at.clone(),
        title: prayer.title.get(lang).to_string(),
        content: prayer.content.get(lang).to_string(),
        image_url: prayer.image.as_deref().map(|p| media_url(state, p)),
    }
}

fn advert_view(advert: &Advertisement, lang: Language, state: &AppState) -> ArticleView {
    ArticleView {
        id: advert.id,
        published_at: advert.published_at.clone(),
        title: advert.title.get(lang).to_string(),
        content: advert.content.get(lang).to_string(),
        image_url: advert.image.as_deref().map(|p| media_url(state, p)),
    }
}

#[derive(Debug, Serialize)]
struct EventView {
    id: i64,
    event_date: String,
    start_time: String,
    end_time: String,
    title: String,
    description: String,
    image_url: Option<String>,
}

fn event_view(event: &Event, lang: Language, state: &AppState) -> EventView {
    EventView {
        id: event.id,
        event_date: event.event_date.clone(),
        start_time: event.start_time.clone(),
        end_time: event.end_time.clone(),
        title: event.title.get(lang).to_string(),
        description: event.description.get(lang).to_string(),
        image_url: event.image.as_deref().map(|p| media_url(state, p)),
    }
}

#[derive(Debug, Serialize)]
struct RoomView {
    id: i64,
    title: String,
    slug: String,
    location: String,
    description: String,
    price_per_night: f64,
}

fn room_view(room: &Room) -> RoomView {
    RoomView {
        id: room.id,
        title: room.title.clone(),
        slug: room.slug.clone(),
        location: room.location.clone(),
        description: room.description.clone(),
        price_per_night: room.price_per_night,
    }
}

#[derive(Debug, Serialize)]
struct TestimonyView {
    author_name: String,
    content: String,
    created_at: String,
}

fn testimony_view(testimony: &Testimony, lang: Language) -> TestimonyView {
    TestimonyView {
        author_name: testimony.author_name.clone(),
        content: testimony.content.get(lang).to_string(),
        created_at: testimony.created_at.clone(),
    }
}

#[derive(Debug, Serialize)]
struct GalleryView {
    caption: String,
    image_url: String,
}

fn gallery_view(item: &GalleryItem, lang: Language, state: &AppState) -> GalleryView {
    GalleryView {
        caption: item.caption.get(lang).to_string(),
        image_url: media_url(state, &item.image),
    }
}

#[derive(Debug, Serialize)]
struct MemberView {
    name: String,
    role: String,
    image_url: Option<String>,
}

fn member_view(member: &Member, state: &AppState) -> MemberView {
    MemberView {
        name: member.name.clone(),
        role: member.role.clone(),
        image_url: member.image.as_deref().map(|p| media_url(state, p)),
    }
}
