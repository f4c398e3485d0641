//! Content repository over SQLite.
//!
//! Every list query returns rows already in the entity's canonical order
//! (typically reverse-chronological); pagination happens above this layer and
//! only slices. Translatable fields are stored as four columns and folded
//! into [`LocalizedText`] when rows are mapped.

use crate::models::*;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database and ensure the schema exists.
    pub fn new(database_path: &str) -> Result<Self> {
        let conn = Connection::open(database_path)
            .context(format!("Failed to open database at {}", database_path))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS mass_schedules (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                mass_type TEXT NOT NULL DEFAULT 'morning',
                title_en TEXT NOT NULL,
                title_fr TEXT NOT NULL DEFAULT '',
                title_rw TEXT NOT NULL DEFAULT '',
                title_sw TEXT NOT NULL DEFAULT '',
                description_en TEXT NOT NULL DEFAULT '',
                description_fr TEXT NOT NULL DEFAULT '',
                description_rw TEXT NOT NULL DEFAULT '',
                description_sw TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS homilies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                published_at TEXT NOT NULL,
                title_en TEXT NOT NULL,
                title_fr TEXT NOT NULL DEFAULT '',
                title_rw TEXT NOT NULL DEFAULT '',
                title_sw TEXT NOT NULL DEFAULT '',
                content_en TEXT NOT NULL DEFAULT '',
                content_fr TEXT NOT NULL DEFAULT '',
                content_rw TEXT NOT NULL DEFAULT '',
                content_sw TEXT NOT NULL DEFAULT '',
                image TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS healing_prayers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title_en TEXT NOT NULL,
                title_fr TEXT NOT NULL DEFAULT '',
                title_rw TEXT NOT NULL DEFAULT '',
                title_sw TEXT NOT NULL DEFAULT '',
                content_en TEXT NOT NULL DEFAULT '',
                content_fr TEXT NOT NULL DEFAULT '',
                content_rw TEXT NOT NULL DEFAULT '',
                content_sw TEXT NOT NULL DEFAULT '',
                image TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                event_date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                title_en TEXT NOT NULL,
                title_fr TEXT NOT NULL DEFAULT '',
                title_rw TEXT NOT NULL DEFAULT '',
                title_sw TEXT NOT NULL DEFAULT '',
                description_en TEXT NOT NULL DEFAULT '',
                description_fr TEXT NOT NULL DEFAULT '',
                description_rw TEXT NOT NULL DEFAULT '',
                description_sw TEXT NOT NULL DEFAULT '',
                image TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS advertisements (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                published_at TEXT NOT NULL,
                title_en TEXT NOT NULL,
                title_fr TEXT NOT NULL DEFAULT '',
                title_rw TEXT NOT NULL DEFAULT '',
                title_sw TEXT NOT NULL DEFAULT '',
                content_en TEXT NOT NULL DEFAULT '',
                content_fr TEXT NOT NULL DEFAULT '',
                content_rw TEXT NOT NULL DEFAULT '',
                content_sw TEXT NOT NULL DEFAULT '',
                image TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS rooms (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                slug TEXT NOT NULL,
                location TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                price_per_night REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS room_images (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_id INTEGER NOT NULL REFERENCES rooms(id),
                image TEXT NOT NULL,
                alt_text TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE IF NOT EXISTS amenities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS room_amenities (
                room_id INTEGER NOT NULL REFERENCES rooms(id),
                amenity_id INTEGER NOT NULL REFERENCES amenities(id),
                PRIMARY KEY (room_id, amenity_id)
            );

            CREATE TABLE IF NOT EXISTS testimonies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author_name TEXT NOT NULL,
                content_en TEXT NOT NULL DEFAULT '',
                content_fr TEXT NOT NULL DEFAULT '',
                content_rw TEXT NOT NULL DEFAULT '',
                content_sw TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS gallery_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                caption_en TEXT NOT NULL DEFAULT '',
                caption_fr TEXT NOT NULL DEFAULT '',
                caption_rw TEXT NOT NULL DEFAULT '',
                caption_sw TEXT NOT NULL DEFAULT '',
                image TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS members (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                image TEXT,
                created_at TEXT NOT NULL
            );",
        )
        .context("Failed to create schema")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // ==================== Mass schedules ====================

    /// All schedules, newest insertion first.
    pub fn list_mass_schedules(&self) -> Result<Vec<MassSchedule>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {MASS_SCHEDULE_COLUMNS} FROM mass_schedules ORDER BY id DESC"
        ))?;
        let rows = stmt
            .query_map([], map_mass_schedule)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn latest_mass_schedules(&self, limit: usize) -> Result<Vec<MassSchedule>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {MASS_SCHEDULE_COLUMNS} FROM mass_schedules ORDER BY id DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map(params![limit as i64], map_mass_schedule)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn insert_mass_schedule(&self, new: &NewMassSchedule) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO mass_schedules (
                date, start_time, end_time, mass_type,
                title_en, title_fr, title_rw, title_sw,
                description_en, description_fr, description_rw, description_sw,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
            params![
                new.date,
                new.start_time,
                new.end_time,
                new.mass_type.as_str(),
                new.title.en,
                new.title.fr,
                new.title.rw,
                new.title.sw,
                new.description.en,
                new.description.fr,
                new.description.rw,
                new.description.sw,
                now,
            ],
        )
        .context("Failed to insert mass schedule")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn delete_mass_schedule(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM mass_schedules WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // ==================== Homilies ====================

    /// All homilies, most recently published first.
    pub fn list_homilies(&self) -> Result<Vec<Homily>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {HOMILY_COLUMNS} FROM homilies
             ORDER BY published_at DESC, created_at DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map([], map_homily)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn latest_homilies(&self, limit: usize) -> Result<Vec<Homily>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {HOMILY_COLUMNS} FROM homilies ORDER BY id DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map(params![limit as i64], map_homily)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn insert_homily(&self, new: &NewHomily) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO homilies (
                published_at,
                title_en, title_fr, title_rw, title_sw,
                content_en, content_fr, content_rw, content_sw,
                image, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                new.published_at,
                new.title.en,
                new.title.fr,
                new.title.rw,
                new.title.sw,
                new.content.en,
                new.content.fr,
                new.content.rw,
                new.content.sw,
                new.image,
                Utc::now().to_rfc3339(),
            ],
        )
        .context("Failed to insert homily")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn delete_homily(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM homilies WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // ==================== Healing prayers ====================

    pub fn list_healing_prayers(&self) -> Result<Vec<HealingPrayer>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PRAYER_COLUMNS} FROM healing_prayers ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map([], map_healing_prayer)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn latest_healing_prayers(&self, limit: usize) -> Result<Vec<HealingPrayer>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PRAYER_COLUMNS} FROM healing_prayers
             ORDER BY created_at DESC, id DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map(params![limit as i64], map_healing_prayer)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn insert_healing_prayer(&self, new: &NewHealingPrayer) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO healing_prayers (
                title_en, title_fr, title_rw, title_sw,
                content_en, content_fr, content_rw, content_sw,
                image, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                new.title.en,
                new.title.fr,
                new.title.rw,
                new.title.sw,
                new.content.en,
                new.content.fr,
                new.content.rw,
                new.content.sw,
                new.image,
                Utc::now().to_rfc3339(),
            ],
        )
        .context("Failed to insert healing prayer")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn delete_healing_prayer(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM healing_prayers WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // ==================== Events ====================

    /// All events, soonest-dated last (reverse-chronological by event date).
    pub fn list_events(&self) -> Result<Vec<Event>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events
             ORDER BY event_date DESC, created_at DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map([], map_event)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn latest_events(&self, limit: usize) -> Result<Vec<Event>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events
             ORDER BY event_date DESC, created_at DESC, id DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map(params![limit as i64], map_event)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_event(&self, id: i64) -> Result<Option<Event>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"
        ))?;
        let event = stmt.query_row(params![id], map_event).optional()?;
        Ok(event)
    }

    pub fn insert_event(&self, new: &NewEvent) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO events (
                event_date, start_time, end_time,
                title_en, title_fr, title_rw, title_sw,
                description_en, description_fr, description_rw, description_sw,
                image, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                new.event_date,
                new.start_time,
                new.end_time,
                new.title.en,
                new.title.fr,
                new.title.rw,
                new.title.sw,
                new.description.en,
                new.description.fr,
                new.description.rw,
                new.description.sw,
                new.image,
                Utc::now().to_rfc3339(),
            ],
        )
        .context("Failed to insert event")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn delete_event(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM events WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // ==================== Advertisements ====================

    pub fn latest_advertisements(&self, limit: usize) -> Result<Vec<Advertisement>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ADVERT_COLUMNS} FROM advertisements
             ORDER BY published_at DESC, created_at DESC, id DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map(params![limit as i64], map_advertisement)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn insert_advertisement(&self, new: &NewAdvertisement) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO advertisements (
                published_at,
                title_en, title_fr, title_rw, title_sw,
                content_en, content_fr, content_rw, content_sw,
                image, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                new.published_at,
                new.title.en,
                new.title.fr,
                new.title.rw,
                new.title.sw,
                new.content.en,
                new.content.fr,
                new.content.rw,
                new.content.sw,
                new.image,
                Utc::now().to_rfc3339(),
            ],
        )
        .context("Failed to insert advertisement")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn delete_advertisement(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM advertisements WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // ==================== Rooms ====================

    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], map_room)?.collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_room(&self, id: i64) -> Result<Option<Room>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?1"))?;
        let room = stmt.query_row(params![id], map_room).optional()?;
        Ok(room)
    }

    /// Up to `limit` rooms in random order, optionally excluding one id.
    /// Used for the home page teaser and the "related rooms" strip.
    pub fn random_rooms(&self, limit: usize, exclude: Option<i64>) -> Result<Vec<Room>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms
             WHERE ?1 IS NULL OR id != ?1
             ORDER BY RANDOM() LIMIT ?2"
        ))?;
        let rows = stmt
            .query_map(params![exclude, limit as i64], map_room)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn room_images(&self, room_id: i64) -> Result<Vec<RoomImage>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, room_id, image, alt_text FROM room_images
             WHERE room_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![room_id], |row| {
                Ok(RoomImage {
                    id: row.get(0)?,
                    room_id: row.get(1)?,
                    image: row.get(2)?,
                    alt_text: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn room_amenities(&self, room_id: i64) -> Result<Vec<Amenity>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT a.id, a.name FROM amenities a
             JOIN room_amenities ra ON ra.amenity_id = a.id
             WHERE ra.room_id = ?1 ORDER BY a.name",
        )?;
        let rows = stmt
            .query_map(params![room_id], |row| {
                Ok(Amenity {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Insert a room with its amenities (created on first use) and images.
    pub fn insert_room(&self, new: &NewRoom) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO rooms (title, slug, location, description, price_per_night, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.title,
                slugify(&new.title),
                new.location,
                new.description,
                new.price_per_night,
                Utc::now().to_rfc3339(),
            ],
        )
        .context("Failed to insert room")?;
        let room_id = conn.last_insert_rowid();

        for name in &new.amenities {
            conn.execute(
                "INSERT OR IGNORE INTO amenities (name) VALUES (?1)",
                params![name],
            )?;
            conn.execute(
                "INSERT OR IGNORE INTO room_amenities (room_id, amenity_id)
                 SELECT ?1, id FROM amenities WHERE name = ?2",
                params![room_id, name],
            )?;
        }

        for image in &new.images {
            conn.execute(
                "INSERT INTO room_images (room_id, image, alt_text) VALUES (?1, ?2, ?3)",
                params![room_id, image.image, image.alt_text],
            )?;
        }

        Ok(room_id)
    }

    pub fn delete_room(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM room_images WHERE room_id = ?1", params![id])?;
        conn.execute("DELETE FROM room_amenities WHERE room_id = ?1", params![id])?;
        let affected = conn.execute("DELETE FROM rooms WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // ==================== Testimonies ====================

    /// Published testimonies, newest first. Pending ones never leave the
    /// admin surface.
    pub fn published_testimonies(&self) -> Result<Vec<Testimony>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TESTIMONY_COLUMNS} FROM testimonies
             WHERE status = 'published' ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map([], map_testimony)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn latest_published_testimonies(&self, limit: usize) -> Result<Vec<Testimony>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TESTIMONY_COLUMNS} FROM testimonies
             WHERE status = 'published' ORDER BY created_at DESC, id DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map(params![limit as i64], map_testimony)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn insert_testimony(&self, new: &NewTestimony) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO testimonies (author_name, content_en, content_fr, content_rw, content_sw, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                new.author_name,
                new.content.en,
                new.content.fr,
                new.content.rw,
                new.content.sw,
                new.status.as_str(),
                Utc::now().to_rfc3339(),
            ],
        )
        .context("Failed to insert testimony")?;
        Ok(conn.last_insert_rowid())
    }

    /// Transition a testimony to published. Returns false for unknown ids.
    pub fn publish_testimony(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "UPDATE testimonies SET status = 'published' WHERE id = ?1",
            params![id],
        )?;
        Ok(affected > 0)
    }

    pub fn delete_testimony(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM testimonies WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // ==================== Gallery ====================

    pub fn list_gallery(&self) -> Result<Vec<GalleryItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {GALLERY_COLUMNS} FROM gallery_items ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map([], map_gallery_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn latest_gallery(&self, limit: usize) -> Result<Vec<GalleryItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {GALLERY_COLUMNS} FROM gallery_items
             ORDER BY created_at DESC, id DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map(params![limit as i64], map_gallery_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn insert_gallery_item(&self, new: &NewGalleryItem) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO gallery_items (caption_en, caption_fr, caption_rw, caption_sw, image, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.caption.en,
                new.caption.fr,
                new.caption.rw,
                new.caption.sw,
                new.image,
                Utc::now().to_rfc3339(),
            ],
        )
        .context("Failed to insert gallery item")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn delete_gallery_item(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM gallery_items WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // ==================== Members ====================

    /// Everyone, grouped for display: by role, then by name.
    pub fn list_members(&self) -> Result<Vec<Member>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY role, name"
        ))?;
        let rows = stmt
            .query_map([], map_member)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn members_with_role(&self, role: &str, limit: usize) -> Result<Vec<Member>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE role = ?1 ORDER BY name LIMIT ?2"
        ))?;
        let rows = stmt
            .query_map(params![role, limit as i64], map_member)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn insert_member(&self, new: &NewMember) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO members (name, role, image, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![new.name, new.role, new.image, Utc::now().to_rfc3339()],
        )
        .context("Failed to insert member")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn delete_member(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM members WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

// ==================== Row mapping ====================

const MASS_SCHEDULE_COLUMNS: &str = "id, date, start_time, end_time, mass_type, \
    title_en, title_fr, title_rw, title_sw, \
    description_en, description_fr, description_rw, description_sw, \
    created_at, updated_at";

const HOMILY_COLUMNS: &str = "id, published_at, \
    title_en, title_fr, title_rw, title_sw, \
    content_en, content_fr, content_rw, content_sw, \
    image, created_at";

const PRAYER_COLUMNS: &str = "id, \
    title_en, title_fr, title_rw, title_sw, \
    content_en, content_fr, content_rw, content_sw, \
    image, created_at";

const EVENT_COLUMNS: &str = "id, event_date, start_time, end_time, \
    title_en, title_fr, title_rw, title_sw, \
    description_en, description_fr, description_rw, description_sw, \
    image, created_at";

const ADVERT_COLUMNS: &str = "id, published_at, \
    title_en, title_fr, title_rw, title_sw, \
    content_en, content_fr, content_rw, content_sw, \
    image, created_at";

const ROOM_COLUMNS: &str = "id, title, slug, location, description, price_per_night, created_at";

const TESTIMONY_COLUMNS: &str =
    "id, author_name, content_en, content_fr, content_rw, content_sw, status, created_at";

const GALLERY_COLUMNS: &str =
    "id, caption_en, caption_fr, caption_rw, caption_sw, image, created_at";

const MEMBER_COLUMNS: &str = "id, name, role, image, created_at";

fn localized(row: &Row, start: usize) -> rusqlite::Result<LocalizedText> {
    Ok(LocalizedText {
        en: row.get(start)?,
        fr: row.get(start + 1)?,
        rw: row.get(start + 2)?,
        sw: row.get(start + 3)?,
    })
}

fn map_mass_schedule(row: &Row) -> rusqlite::Result<MassSchedule> {
    Ok(MassSchedule {
        id: row.get(0)?,
        date: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        mass_type: MassType::from_db(&row.get::<_, String>(4)?),
        title: localized(row, 5)?,
        description: localized(row, 9)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

fn map_homily(row: &Row) -> rusqlite::Result<Homily> {
    Ok(Homily {
        id: row.get(0)?,
        published_at: row.get(1)?,
        title: localized(row, 2)?,
        content: localized(row, 6)?,
        image: row.get(10)?,
        created_at: row.get(11)?,
    })
}

fn map_healing_prayer(row: &Row) -> rusqlite::Result<HealingPrayer> {
    Ok(HealingPrayer {
        id: row.get(0)?,
        title: localized(row, 1)?,
        content: localized(row, 5)?,
        image: row.get(9)?,
        created_at: row.get(10)?,
    })
}

fn map_event(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        event_date: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        title: localized(row, 4)?,
        description: localized(row, 8)?,
        image: row.get(12)?,
        created_at: row.get(13)?,
    })
}

fn map_advertisement(row: &Row) -> rusqlite::Result<Advertisement> {
    Ok(Advertisement {
        id: row.get(0)?,
        published_at: row.get(1)?,
        title: localized(row, 2)?,
        content: localized(row, 6)?,
        image: row.get(10)?,
        created_at: row.get(11)?,
    })
}

fn map_room(row: &Row) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        location: row.get(3)?,
        description: row.get(4)?,
        price_per_night: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn map_testimony(row: &Row) -> rusqlite::Result<Testimony> {
    Ok(Testimony {
        id: row.get(0)?,
        author_name: row.get(1)?,
        content: localized(row, 2)?,
        status: TestimonyStatus::from_db(&row.get::<_, String>(6)?),
        created_at: row.get(7)?,
    })
}

fn map_gallery_item(row: &Row) -> rusqlite::Result<GalleryItem> {
    Ok(GalleryItem {
        id: row.get(0)?,
        caption: localized(row, 1)?,
        image: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn map_member(row: &Row) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        image: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ==================== Helper Functions ====================

    fn create_test_db() -> (Database, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test_parish.db");
        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to create database");
        (db, temp_dir)
    }

    fn sample_event(day: u32) -> NewEvent {
        NewEvent {
            event_date: format!("2026-09-{day:02}"),
            start_time: "10:00".into(),
            end_time: "12:00".into(),
            title: LocalizedText::uniform(&format!("Event {day}")),
            description: LocalizedText::uniform("A parish gathering"),
            image: None,
        }
    }

    // ==================== Initialization Tests ====================

    #[test]
    fn test_database_creation() {
        let (db, _temp_dir) = create_test_db();
        assert!(db.list_events().expect("Should list").is_empty());
        assert!(db.list_rooms().expect("Should list").is_empty());
    }

    #[test]
    fn test_database_reopening_persists_rows() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let path_str = db_path.to_str().unwrap();

        {
            let db = Database::new(path_str).expect("Failed to create database");
            db.insert_event(&sample_event(1)).expect("Should insert");
        }

        {
            let db = Database::new(path_str).expect("Failed to reopen database");
            assert_eq!(db.list_events().expect("Should list").len(), 1);
        }
    }

    #[test]
    fn test_invalid_database_path() {
        let result = Database::new("/non/existent/path/db.db");
        assert!(result.is_err());
    }

    // ==================== Event Tests ====================

    #[test]
    fn test_events_ordered_by_date_desc() {
        let (db, _temp_dir) = create_test_db();
        db.insert_event(&sample_event(3)).unwrap();
        db.insert_event(&sample_event(12)).unwrap();
        db.insert_event(&sample_event(7)).unwrap();

        let events = db.list_events().expect("Should list");
        let dates: Vec<&str> = events.iter().map(|e| e.event_date.as_str()).collect();
        assert_eq!(dates, vec!["2026-09-12", "2026-09-07", "2026-09-03"]);
    }

    #[test]
    fn test_get_event_by_id() {
        let (db, _temp_dir) = create_test_db();
        let id = db.insert_event(&sample_event(5)).unwrap();

        let event = db.get_event(id).expect("Should query").expect("Should exist");
        assert_eq!(event.title.en, "Event 5");
    }

    #[test]
    fn test_get_event_missing_is_none() {
        let (db, _temp_dir) = create_test_db();
        assert!(db.get_event(9999).expect("Should query").is_none());
    }

    #[test]
    fn test_delete_event() {
        let (db, _temp_dir) = create_test_db();
        let id = db.insert_event(&sample_event(1)).unwrap();
        assert!(db.delete_event(id).expect("Should delete"));
        assert!(!db.delete_event(id).expect("Second delete is a no-op"));
    }

    #[test]
    fn test_localized_fields_round_trip() {
        let (db, _temp_dir) = create_test_db();
        let mut new = sample_event(2);
        new.title = LocalizedText {
            en: "Easter Vigil".into(),
            fr: "Veillée pascale".into(),
            rw: "Igitaramo cya Pasika".into(),
            sw: "Mkesha wa Pasaka".into(),
        };
        let id = db.insert_event(&new).unwrap();

        let event = db.get_event(id).unwrap().unwrap();
        assert_eq!(event.title.fr, "Veillée pascale");
        assert_eq!(event.title.sw, "Mkesha wa Pasaka");
    }

    // ==================== Mass Schedule Tests ====================

    #[test]
    fn test_mass_schedules_newest_insertion_first() {
        let (db, _temp_dir) = create_test_db();
        for day in 1..=3 {
            db.insert_mass_schedule(&NewMassSchedule {
                date: format!("2026-07-{day:02}"),
                start_time: "08:00".into(),
                end_time: "09:00".into(),
                mass_type: MassType::Morning,
                title: LocalizedText::uniform("Daily Mass"),
                description: LocalizedText::default(),
            })
            .unwrap();
        }

        let schedules = db.list_mass_schedules().unwrap();
        assert_eq!(schedules.len(), 3);
        // Last inserted comes first.
        assert_eq!(schedules[0].date, "2026-07-03");
        assert_eq!(schedules[2].date, "2026-07-01");
    }

    #[test]
    fn test_latest_mass_schedules_limit() {
        let (db, _temp_dir) = create_test_db();
        for day in 1..=6 {
            db.insert_mass_schedule(&NewMassSchedule {
                date: format!("2026-07-{day:02}"),
                start_time: "18:00".into(),
                end_time: "19:00".into(),
                mass_type: MassType::Evening,
                title: LocalizedText::uniform("Evening Mass"),
                description: LocalizedText::default(),
            })
            .unwrap();
        }
        assert_eq!(db.latest_mass_schedules(4).unwrap().len(), 4);
    }

    // ==================== Room Tests ====================

    #[test]
    fn test_insert_room_with_amenities_and_images() {
        let (db, _temp_dir) = create_test_db();
        let id = db
            .insert_room(&NewRoom {
                title: "Garden Suite".into(),
                location: "Kigali".into(),
                description: "Quiet room facing the garden".into(),
                price_per_night: 85.0,
                amenities: vec!["Free WiFi".into(), "Parking".into()],
                images: vec![NewRoomImage {
                    image: "rooms/garden-suite/1.jpg".into(),
                    alt_text: "Garden Suite".into(),
                }],
            })
            .unwrap();

        let room = db.get_room(id).unwrap().unwrap();
        assert_eq!(room.slug, "garden-suite");
        assert_eq!(db.room_amenities(id).unwrap().len(), 2);
        assert_eq!(db.room_images(id).unwrap().len(), 1);
    }

    #[test]
    fn test_amenities_are_shared_between_rooms() {
        let (db, _temp_dir) = create_test_db();
        let room = |title: &str| NewRoom {
            title: title.into(),
            location: "Kigali".into(),
            description: String::new(),
            price_per_night: 50.0,
            amenities: vec!["Free WiFi".into()],
            images: vec![],
        };
        let a = db.insert_room(&room("Room A")).unwrap();
        let b = db.insert_room(&room("Room B")).unwrap();

        let a_wifi = &db.room_amenities(a).unwrap()[0];
        let b_wifi = &db.room_amenities(b).unwrap()[0];
        assert_eq!(a_wifi.id, b_wifi.id, "Amenity row should be reused");
    }

    #[test]
    fn test_random_rooms_excludes_given_id() {
        let (db, _temp_dir) = create_test_db();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(
                db.insert_room(&NewRoom {
                    title: format!("Room {i}"),
                    location: String::new(),
                    description: String::new(),
                    price_per_night: 10.0,
                    amenities: vec![],
                    images: vec![],
                })
                .unwrap(),
            );
        }

        let related = db.random_rooms(3, Some(ids[0])).unwrap();
        assert_eq!(related.len(), 3);
        assert!(related.iter().all(|r| r.id != ids[0]));
    }

    #[test]
    fn test_delete_room_removes_attachments() {
        let (db, _temp_dir) = create_test_db();
        let id = db
            .insert_room(&NewRoom {
                title: "Chapel View".into(),
                location: String::new(),
                description: String::new(),
                price_per_night: 40.0,
                amenities: vec!["Breakfast Included".into()],
                images: vec![NewRoomImage {
                    image: "rooms/chapel-view/1.jpg".into(),
                    alt_text: String::new(),
                }],
            })
            .unwrap();

        assert!(db.delete_room(id).unwrap());
        assert!(db.get_room(id).unwrap().is_none());
        assert!(db.room_images(id).unwrap().is_empty());
        assert!(db.room_amenities(id).unwrap().is_empty());
    }

    // ==================== Testimony Tests ====================

    #[test]
    fn test_pending_testimonies_are_hidden() {
        let (db, _temp_dir) = create_test_db();
        db.insert_testimony(&NewTestimony {
            author_name: "Agnes".into(),
            content: LocalizedText::uniform("I found peace here."),
            status: TestimonyStatus::Pending,
        })
        .unwrap();

        assert!(db.published_testimonies().unwrap().is_empty());
    }

    #[test]
    fn test_publish_testimony_transition() {
        let (db, _temp_dir) = create_test_db();
        let id = db
            .insert_testimony(&NewTestimony {
                author_name: "Jean".into(),
                content: LocalizedText::uniform("Grateful for this community."),
                status: TestimonyStatus::Pending,
            })
            .unwrap();

        assert!(db.publish_testimony(id).unwrap());
        let published = db.published_testimonies().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].status, TestimonyStatus::Published);

        assert!(!db.publish_testimony(9999).unwrap());
    }

    // ==================== Member Tests ====================

    #[test]
    fn test_members_with_role() {
        let (db, _temp_dir) = create_test_db();
        for (name, role) in [
            ("Fr. Emmanuel", "Priest"),
            ("Fr. Pio", "Priest"),
            ("Chantal", "Choir Member"),
        ] {
            db.insert_member(&NewMember {
                name: name.into(),
                role: role.into(),
                image: None,
            })
            .unwrap();
        }

        let priests = db.members_with_role("Priest", 4).unwrap();
        assert_eq!(priests.len(), 2);
        assert!(priests.iter().all(|m| m.role == "Priest"));
        assert_eq!(db.list_members().unwrap().len(), 3);
    }

    // ==================== Gallery Tests ====================

    #[test]
    fn test_gallery_insert_and_list() {
        let (db, _temp_dir) = create_test_db();
        for i in 0..3 {
            db.insert_gallery_item(&NewGalleryItem {
                caption: LocalizedText::uniform(&format!("Choir practice {i}")),
                image: format!("gallery/choir-{i}.jpg"),
            })
            .unwrap();
        }

        let items = db.list_gallery().unwrap();
        assert_eq!(items.len(), 3);
        // Newest first via the id tiebreak.
        assert_eq!(items[0].caption.en, "Choir practice 2");
        assert_eq!(db.latest_gallery(2).unwrap().len(), 2);
    }
}
