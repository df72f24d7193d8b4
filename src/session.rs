//! Per-browser session state: the cart, the logged-in account and pending
//! flash messages.
//!
//! Sessions are loaded and saved whole through [`SessionStore`]. The HTTP
//! layer keys them by the `sessionid` cookie.

use crate::cart::Cart;
use crate::model::AccountId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A one-shot message shown on the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub cart: Cart,
    pub account_id: Option<AccountId>,
    pub messages: Vec<FlashMessage>,
}

impl Session {
    pub fn flash(&mut self, message: FlashMessage) {
        self.messages.push(message);
    }

    /// Drains the pending messages; each is shown once.
    pub fn take_messages(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.messages)
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The stored session, or a fresh one for unknown or expired keys.
    async fn load(&self, key: Uuid) -> Session;

    /// Stores `session` under `key`. An empty session is removed instead.
    async fn save(&self, key: Uuid, session: Session);

    async fn remove(&self, key: Uuid);
}

/// Sessions untouched for two weeks are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(14 * 24 * 60 * 60);

#[derive(Debug)]
struct Entry {
    session: Session,
    touched: Instant,
}

#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    idle_timeout: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Stored sessions, expired ones included until the next save sweeps them.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn expired(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.touched) >= self.idle_timeout
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, key: Uuid) -> Session {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&key) {
            Some(entry) if !self.expired(entry, now) => {
                entry.touched = now;
                entry.session.clone()
            }
            Some(_) => {
                debug!(%key, "Session expired");
                sessions.remove(&key);
                Session::default()
            }
            None => Session::default(),
        }
    }

    async fn save(&self, key: Uuid, session: Session) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| !self.expired(entry, now));
        if session == Session::default() {
            sessions.remove(&key);
        } else {
            sessions.insert(
                key,
                Entry {
                    session,
                    touched: now,
                },
            );
        }
    }

    async fn remove(&self, key: Uuid) {
        self.sessions.write().await.remove(&key);
    }
}
