//! Request extractors for the cookie session.

use super::{AppError, AppState};
use crate::model::Account;
use crate::session::{FlashMessage, Session, SessionStore};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sessionid";

/// The caller's session, with a cookie issued on first contact.
///
/// Changes are kept only when the handler calls [`CurrentSession::save`], and
/// only if the data actually changed.
pub struct CurrentSession {
    key: Uuid,
    cookies: Cookies,
    store: Arc<dyn SessionStore>,
    loaded: Session,
    pub data: Session,
}

fn session_cookie(key: Uuid) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, key.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

impl CurrentSession {
    pub fn flash(&mut self, message: FlashMessage) {
        self.data.flash(message);
    }

    pub async fn save(self) {
        if self.data != self.loaded {
            self.store.save(self.key, self.data).await;
        }
    }

    /// Moves the data to a fresh key and drops the old entry, so a key known
    /// before login is worthless after it.
    pub async fn cycle_key(&mut self) {
        let old = self.key;
        self.key = Uuid::new_v4();
        self.cookies.add(session_cookie(self.key));
        self.store.remove(old).await;
        self.loaded = Session::default();
        debug!("Session key cycled");
    }

    /// Drops everything stored for the caller and starts over on a new key.
    pub async fn flush(mut self) {
        self.cycle_key().await;
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        let existing = cookies
            .get(SESSION_COOKIE)
            .and_then(|c| Uuid::parse_str(c.value()).ok());
        let key = match existing {
            Some(key) => key,
            None => {
                let key = Uuid::new_v4();
                cookies.add(session_cookie(key));
                key
            }
        };

        let data = state.sessions.load(key).await;
        Ok(Self {
            key,
            cookies,
            store: state.sessions.clone(),
            loaded: data.clone(),
            data,
        })
    }
}

/// A session with a logged-in, still existing account. Rejects with 401.
pub struct Authenticated {
    pub account: Account,
    pub session: CurrentSession,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = CurrentSession::from_request_parts(parts, state).await?;
        let Some(id) = session.data.account_id else {
            return Err(AppError::unauthenticated());
        };
        let account = match state.identity.account(id).await {
            Ok(account) if account.is_active => account,
            _ => return Err(AppError::unauthenticated()),
        };
        Ok(Self { account, session })
    }
}
