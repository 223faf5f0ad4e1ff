//! Per-visitor session holding the backend token pair.
//!
//! A browser is identified by the `spw_session` cookie. The token pair lives
//! in memory for the duration of a request and is mirrored to SQLite on every
//! write, so the next request of the same visitor starts from it. A session
//! gets a row and a cookie only once it has tokens to keep; anonymous
//! browsing leaves nothing behind.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use cookie::{Cookie, SameSite};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::client::ApiClient;
use crate::db::{SessionRepository, StoredTokens};
use crate::errors::AppError;
use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "spw_session";

/// How often idle sessions are swept from the store.
const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

struct SessionState {
    id: Uuid,
    tokens: StoredTokens,
    /// Whether a row exists under `id`.
    stored: bool,
}

/// Token store scoped to one visitor.
#[derive(Clone)]
pub struct Session {
    repo: SessionRepository,
    state: Arc<RwLock<SessionState>>,
}

impl Session {
    /// Open the session named by the cookie. A missing or unknown cookie
    /// gives a fresh session that is not written until it receives tokens.
    pub async fn open(repo: SessionRepository, id: Option<Uuid>) -> Result<Self, AppError> {
        if let Some(id) = id {
            if let Some(tokens) = repo.load_tokens(id).await? {
                return Ok(Self::with_state(repo, SessionState { id, tokens, stored: true }));
            }
            tracing::debug!(session = %id, "Unknown session cookie");
        }

        Ok(Self::with_state(
            repo,
            SessionState {
                id: Uuid::new_v4(),
                tokens: StoredTokens::default(),
                stored: false,
            },
        ))
    }

    fn with_state(repo: SessionRepository, state: SessionState) -> Self {
        Self {
            repo,
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Id the browser should carry, `None` while nothing is stored.
    pub async fn stored_id(&self) -> Option<Uuid> {
        let state = self.state.read().await;
        state.stored.then_some(state.id)
    }

    pub async fn access_token(&self) -> Option<String> {
        self.state.read().await.tokens.access.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.state.read().await.tokens.refresh.clone()
    }

    /// Replace both tokens, creating the row on first use.
    pub async fn set_tokens(&self, access: String, refresh: Option<String>) -> Result<(), AppError> {
        let tokens = StoredTokens {
            access: Some(access),
            refresh,
        };
        let mut state = self.state.write().await;
        if state.stored {
            self.repo.store_tokens(state.id, &tokens).await?;
        } else {
            self.repo.insert_session(state.id, &tokens).await?;
            state.stored = true;
        }
        state.tokens = tokens;
        Ok(())
    }

    /// Switch to a new id and drop the old row, so an id known before
    /// sign-in never carries the signed-in tokens.
    pub async fn renew(&self) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state.stored {
            self.repo.delete_session(state.id).await?;
            state.stored = false;
        }
        let old = std::mem::replace(&mut state.id, Uuid::new_v4());
        state.tokens = StoredTokens::default();
        tracing::debug!(from = %old, to = %state.id, "Renewed session id");
        Ok(())
    }

    /// Forget the session; the next request with its cookie starts a new one.
    pub async fn end(&self) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state.stored && !self.repo.delete_session(state.id).await? {
            tracing::debug!(session = %state.id, "Session already gone");
        }
        state.stored = false;
        state.tokens = StoredTokens::default();
        Ok(())
    }

    /// Drop both tokens.
    pub async fn clear_tokens(&self) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state.stored {
            self.repo.clear_tokens(state.id).await?;
        }
        state.tokens = StoredTokens::default();
        Ok(())
    }
}

/// Session id carried by the request's `Cookie` header, if any parses.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
}

/// `Set-Cookie` value for a freshly issued session.
pub fn session_cookie(id: Uuid, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// `Set-Cookie` value telling the browser to drop its session cookie.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(Uuid::nil(), secure);
    cookie.make_removal();
    cookie
}

/// Cookie to send back, if the browser's copy no longer matches the session.
async fn cookie_update(session: &Session, presented: Option<Uuid>, secure: bool) -> Option<Cookie<'static>> {
    match (session.stored_id().await, presented) {
        (Some(id), presented) if presented != Some(id) => Some(session_cookie(id, secure)),
        (None, Some(_)) => Some(removal_cookie(secure)),
        _ => None,
    }
}

/// Middleware opening the visitor's session, resolving who they are and
/// handing both to the handlers as an [`AuthContext`] extension.
pub async fn session_layer(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let cookie_id = session_id_from_headers(request.headers());

    let session = match Session::open(state.sessions.clone(), cookie_id).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    let client = ApiClient::new(state.http.clone(), &state.config.api_url, session.clone());
    let mut auth = AuthContext::new(client);
    auth.resolve().await;
    request.extensions_mut().insert(auth);

    let mut response = next.run(request).await;

    if let Some(cookie) = cookie_update(&session, cookie_id, state.config.secure_cookies).await {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to encode session cookie: {}", e),
        }
    }

    response
}

/// Periodically delete sessions nobody has written to for `idle`.
pub fn spawn_purge_task(repo: SessionRepository, idle: chrono::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match repo.purge_idle(Utc::now() - idle).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Purged idle sessions"),
                Err(e) => tracing::warn!("Failed to purge idle sessions: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn repository() -> (TempDir, SessionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("sessions.sqlite"))
            .await
            .unwrap();
        (temp_dir, SessionRepository::new(pool))
    }

    #[test]
    fn test_session_id_from_cookie_header() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}", SESSION_COOKIE, id)).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_malformed_session_id_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("spw_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(Uuid::nil(), false).to_string();
        assert!(cookie.starts_with("spw_session=00000000-0000-0000-0000-000000000000"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));

        let removal = removal_cookie(true).to_string();
        assert!(removal.starts_with("spw_session=;"));
        assert!(removal.contains("Max-Age=0"));
        assert!(removal.contains("Secure"));
    }

    #[tokio::test]
    async fn test_anonymous_session_writes_nothing() {
        let (_dir, repo) = repository().await;

        let session = Session::open(repo.clone(), None).await.unwrap();
        assert_eq!(session.stored_id().await, None);
        session.clear_tokens().await.unwrap();
        session.end().await.unwrap();

        // An unknown cookie is not adopted either
        let session = Session::open(repo.clone(), Some(Uuid::new_v4())).await.unwrap();
        assert_eq!(session.stored_id().await, None);
        assert_eq!(cookie_update(&session, None, false).await, None);

        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn test_first_tokens_create_the_row() {
        let (_dir, repo) = repository().await;
        let session = Session::open(repo.clone(), None).await.unwrap();

        session
            .set_tokens("access".to_string(), Some("refresh".to_string()))
            .await
            .unwrap();
        let id = session.stored_id().await.unwrap();
        assert_eq!(repo.count().await, 1);

        let reopened = Session::open(repo.clone(), Some(id)).await.unwrap();
        assert_eq!(reopened.stored_id().await, Some(id));
        assert_eq!(reopened.access_token().await.as_deref(), Some("access"));
        assert_eq!(cookie_update(&reopened, Some(id), false).await, None);
    }

    #[tokio::test]
    async fn test_renew_abandons_the_old_id() {
        let (_dir, repo) = repository().await;
        let planted = Uuid::new_v4();
        repo.insert_session(planted, &StoredTokens::default()).await.unwrap();

        let session = Session::open(repo.clone(), Some(planted)).await.unwrap();
        session.renew().await.unwrap();
        session.set_tokens("access".to_string(), None).await.unwrap();

        let id = session.stored_id().await.unwrap();
        assert_ne!(id, planted);
        assert_eq!(repo.load_tokens(planted).await.unwrap(), None);
        assert_eq!(repo.count().await, 1);

        let cookie = cookie_update(&session, Some(planted), false).await.unwrap();
        assert_eq!(cookie.value(), id.to_string());
    }

    #[tokio::test]
    async fn test_ended_session_clears_the_cookie() {
        let (_dir, repo) = repository().await;
        let session = Session::open(repo.clone(), None).await.unwrap();
        session.set_tokens("access".to_string(), None).await.unwrap();
        let id = session.stored_id().await.unwrap();

        session.end().await.unwrap();
        assert_eq!(repo.count().await, 0);

        let cookie = cookie_update(&session, Some(id), false).await.unwrap();
        assert_eq!(cookie.value(), "");
    }
}
