use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    api::{middleware::auth::session_token, state::AppState},
    auth::AdminAuth,
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let Json(req) = payload?;
    let admin_auth = &state.service_context.admin_auth;

    let token = admin_auth
        .login(&req.password)
        .await
        .ok_or(AppError::Unauthorized)?;

    let cookie = admin_auth.session_cookie(&token);

    Ok((jar.add(cookie), Json(LoginResponse { token })))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(token) = session_token(&jar, &request) {
        state.service_context.admin_auth.logout(&token).await;
    }

    Ok((jar.add(AdminAuth::logout_cookie()), StatusCode::NO_CONTENT))
}

pub async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
) -> Json<SessionStatus> {
    let authenticated = match session_token(&jar, &request) {
        Some(token) => state.service_context.admin_auth.validate(&token).await,
        None => false,
    };

    Json(SessionStatus { authenticated })
}
