use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, HeaderValue, header, request::Parts};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::access::Actor;
use crate::application::use_cases::auth::sessions::{ResolveSession, StartSession};
use crate::application::use_cases::users::get_user::GetUser;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::session::UserSession;
use crate::domain::users::user::User;
use crate::presentation::http::error::ApiError;

pub const SESSION_COOKIE: &str = "warbler_session";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the logged-in user.
    pub sub: String,
    /// Id of the server-side session row.
    pub jti: String,
    pub exp: usize,
}

/// What a verified token claims. Still has to be checked against the
/// sessions table before it means anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub session_id: Uuid,
}

pub fn issue_token(cfg: &Config, session: &UserSession) -> anyhow::Result<String> {
    let claims = Claims {
        sub: session.user_id.to_string(),
        jti: session.id.to_string(),
        exp: session.expires_at.timestamp().max(0) as usize,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.session_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(cfg: &Config, token: &str) -> Option<TokenClaims> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.session_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    Some(TokenClaims {
        user_id: Uuid::parse_str(&data.claims.sub).ok()?,
        session_id: Uuid::parse_str(&data.claims.jti).ok()?,
    })
}

/// Records a new session for `user_id` and returns its signed token.
pub async fn start_session(ctx: &AppContext, user_id: Uuid) -> anyhow::Result<String> {
    let repo = ctx.session_repo();
    let uc = StartSession {
        repo: repo.as_ref(),
    };
    let session = uc.execute(user_id, ctx.cfg.session_expires_secs).await?;
    issue_token(&ctx.cfg, &session)
}

/// Resolved session state. A missing, expired, revoked or forged token yields
/// `Actor::Anonymous`; only a failing session store rejects the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Session {
    pub actor: Actor,
    /// Present only when the token matched a live session row.
    pub id: Option<Uuid>,
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let Some(claims) = raw_token(&parts.headers).and_then(|t| decode_token(&ctx.cfg, &t))
        else {
            return Ok(Session::default());
        };
        let repo = ctx.session_repo();
        let uc = ResolveSession {
            repo: repo.as_ref(),
        };
        match uc.execute(claims.session_id, claims.user_id).await? {
            Some(user_id) => Ok(Session {
                actor: Actor::User(user_id),
                id: Some(claims.session_id),
            }),
            None => Ok(Session::default()),
        }
    }
}

fn raw_token(headers: &HeaderMap) -> Option<String> {
    // 1) Prefer Authorization header if present
    if let Some(t) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(t.trim().to_string());
    }
    // 2) Fallback to the HttpOnly session cookie
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|c| get_cookie(c, SESSION_COOKIE))
}

/// Loads the logged-in user. A session whose user was deleted counts as anonymous.
pub async fn require_user(ctx: &AppContext, session: &Session) -> Result<User, ApiError> {
    let user_id = session.actor.require_user()?;
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    uc.execute(user_id).await?.ok_or(ApiError::Unauthorized)
}

/// Like `require_user` but tolerates anonymous clients.
pub async fn optional_user(ctx: &AppContext, session: &Session) -> Result<Option<User>, ApiError> {
    match session.actor {
        Actor::Anonymous => Ok(None),
        Actor::User(id) => {
            let repo = ctx.user_repo();
            let uc = GetUser {
                repo: repo.as_ref(),
            };
            Ok(uc.execute(id).await?)
        }
    }
}

// --- Cookie helpers ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn build_session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

pub fn login_headers(cfg: &Config, token: &str) -> HeaderMap {
    let cookie = build_session_cookie(token, cfg.session_expires_secs, cfg.secure_cookies());
    cookie_headers(&cookie)
}

pub fn logout_headers(cfg: &Config) -> HeaderMap {
    let cookie = build_session_cookie("", 0, cfg.secure_cookies());
    cookie_headers(&cookie)
}

fn cookie_headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            headers.insert(header::SET_COOKIE, value);
        }
        Err(err) => {
            tracing::error!(error = %err, "invalid_session_cookie");
        }
    }
    headers
}
