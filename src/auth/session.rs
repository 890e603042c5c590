use axum::http::{header, HeaderMap, HeaderValue};
use model::entities::{role, user};
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use tracing::{trace, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::schemas::AppState;

/// Name of the cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "celecart_session";

/// Sessions live for seven days; the server-side store uses the same TTL as
/// the cookie Max-Age so both expire together.
pub const SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Server-side session record, keyed by the opaque id in the cookie.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: i32,
}

/// Format the Set-Cookie value that establishes a session.
pub fn session_cookie(session_id: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, session_id, SESSION_TTL_SECS
    )
}

/// Format the Set-Cookie value that expires the session cookie.
pub fn expired_session_cookie() -> String {
    format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        SESSION_COOKIE
    )
}

/// Response headers that establish a session.
pub fn session_headers(session_id: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&session_cookie(session_id))
        .map_err(|e| AppError::Internal(format!("Invalid session cookie header: {}", e)))?;
    headers.insert(header::SET_COOKIE, value);
    Ok(headers)
}

/// Response headers that expire the session cookie.
pub fn logout_headers() -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&expired_session_cookie())
        .map_err(|e| AppError::Internal(format!("Invalid session cookie header: {}", e)))?;
    headers.insert(header::SET_COOKIE, value);
    Ok(headers)
}

/// Extract the session id from the request's Cookie header, if any.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// Create a new session for the user and return its opaque id.
pub async fn open_session(state: &AppState, user_id: i32) -> String {
    let session_id = Uuid::new_v4().to_string();
    state
        .sessions
        .insert(session_id.clone(), Session { user_id })
        .await;
    trace!("Opened session for user {}", user_id);
    session_id
}

/// Invalidate the session referenced by the request, if any.
pub async fn close_session(state: &AppState, headers: &HeaderMap) {
    if let Some(session_id) = session_id_from_headers(headers) {
        state.sessions.invalidate(&session_id).await;
        trace!("Closed session");
    }
}

/// Resolve the authenticated user behind the request.
///
/// Sessions of users that have since been rejected or deactivated are
/// invalidated on sight.
pub async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<user::Model, AppError> {
    let session_id = session_id_from_headers(headers).ok_or(AppError::AuthRequired)?;
    let session = state
        .sessions
        .get(&session_id)
        .await
        .ok_or(AppError::AuthRequired)?;

    let user_model = user::Entity::find_by_id(session.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::AuthRequired)?;

    if !user_model.can_authenticate() {
        warn!(
            "Dropping session of user {} with status {:?}",
            user_model.id, user_model.account_status
        );
        state.sessions.invalidate(&session_id).await;
        return Err(AppError::AuthRequired);
    }

    Ok(user_model)
}

/// Resolve the authenticated user and require the admin role.
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<user::Model, AppError> {
    let user_model = require_user(state, headers).await?;
    if !has_role(&state.db, &user_model, role::ADMIN).await? {
        return Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        ));
    }
    Ok(user_model)
}

/// Names of all roles granted to the user.
pub async fn role_names(
    db: &DatabaseConnection,
    user_model: &user::Model,
) -> Result<Vec<String>, AppError> {
    let roles = user_model.find_related(role::Entity).all(db).await?;
    Ok(roles.into_iter().map(|r| r.name).collect())
}

pub async fn has_role(
    db: &DatabaseConnection,
    user_model: &user::Model,
    role_name: &str,
) -> Result<bool, AppError> {
    Ok(role_names(db, user_model).await?.iter().any(|n| n == role_name))
}
