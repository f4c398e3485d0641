//! Per-client session state.
//!
//! Sessions are an in-memory map of string key/value pairs keyed by a random
//! id carried in the `sid` cookie. The only value the site currently stores
//! is the chosen language, but the store is a plain key/value interface so it
//! stays agnostic of what handlers keep in it.
//!
//! Sessions expire after 24 hours idle; an expired or unknown id simply gets
//! a fresh session, never an error.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "sid";

const DEFAULT_MAX_IDLE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct Session {
    data: HashMap<String, String>,
    last_accessed: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            data: HashMap::new(),
            last_accessed: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }

    fn is_expired(&self, max_idle: Duration) -> bool {
        self.last_accessed.elapsed() > max_idle
    }
}

/// Thread-safe in-memory session store.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    max_idle: Duration,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_max_idle(DEFAULT_MAX_IDLE)
    }

    pub fn with_max_idle(max_idle: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_idle,
        }
    }

    /// Return a usable session id for this client.
    ///
    /// If `candidate` names a live session it is reused; otherwise (missing,
    /// unknown, or expired) a fresh session is created. The bool is `true`
    /// when a new session was created and the cookie needs to be (re)set.
    pub fn ensure(&self, candidate: Option<&str>) -> (String, bool) {
        let mut sessions = self.sessions.write().unwrap();

        if let Some(id) = candidate {
            if let Some(session) = sessions.get_mut(id) {
                if !session.is_expired(self.max_idle) {
                    session.touch();
                    return (id.to_string(), false);
                }
                sessions.remove(id);
            }
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(id.clone(), Session::new());
        (id, true)
    }

    /// Read a value from a session. Unknown ids read as empty sessions.
    pub fn get(&self, session_id: &str, key: &str) -> Option<String> {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions.get_mut(session_id)?;
        session.touch();
        session.data.get(key).cloned()
    }

    /// Write a value into a session. Writes to unknown ids are dropped;
    /// callers go through [`SessionStore::ensure`] first.
    pub fn set(&self, session_id: &str, key: &str, value: &str) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(session) = sessions.get_mut(session_id) {
            session.touch();
            session.data.insert(key.to_string(), value.to_string());
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the session id out of the request's `Cookie` headers, if any.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// `Set-Cookie` value for a freshly created session.
pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}
