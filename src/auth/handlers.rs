// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::cookie::{auth_cookie, logout_cookie};
use super::middleware::{AuthRequest, require_auth};
use crate::config::ValidatedConfig;
use crate::error::ApiError;
use crate::provider::{AuthUser, ProviderAuth, ProviderErrorKind};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/signup", web::post().to(signup))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me))
            .route(
                "/request-password-reset",
                web::post().to(request_password_reset),
            )
            .route("/reset-password", web::post().to(reset_password)),
    );
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

async fn login(
    payload: web::Json<CredentialsRequest>,
    provider_auth: web::Data<ProviderAuth>,
    config: web::Data<ValidatedConfig>,
) -> Result<HttpResponse, ApiError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let session = provider_auth
        .sign_in(email, &payload.password)
        .await
        .map_err(|err| match err.kind() {
            // Never distinguish unknown email from wrong password.
            ProviderErrorKind::Unauthorized | ProviderErrorKind::Internal => ApiError::Unauthorized,
            _ => err.into(),
        })?;

    Ok(HttpResponse::Ok()
        .cookie(auth_cookie(&config, &session.access_token))
        .json(UserResponse::from(session.user)))
}

async fn signup(
    payload: web::Json<CredentialsRequest>,
    provider_auth: web::Data<ProviderAuth>,
    config: web::Data<ValidatedConfig>,
) -> Result<HttpResponse, ApiError> {
    let email = payload.email.trim();
    if !email.contains('@') {
        return Err(ApiError::validation("A valid email address is required"));
    }
    if payload.password.chars().count() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let session = provider_auth
        .sign_up(email, &payload.password)
        .await
        .map_err(|err| match err.kind() {
            ProviderErrorKind::Conflict => {
                ApiError::Conflict("Unable to create an account with these details".to_string())
            }
            _ => err.into(),
        })?;

    Ok(HttpResponse::Created()
        .cookie(auth_cookie(&config, &session.access_token))
        .json(UserResponse::from(session.user)))
}

async fn logout(
    req: HttpRequest,
    provider_auth: web::Data<ProviderAuth>,
    config: web::Data<ValidatedConfig>,
) -> Result<HttpResponse, ApiError> {
    if let Some(token) = req.bearer_token() {
        match provider_auth.sign_out(&token).await {
            Ok(()) => {}
            // Token already dead upstream; clearing the cookie is enough.
            Err(err) if err.kind() == ProviderErrorKind::Unauthorized => {}
            Err(err) => return Err(err.into()),
        }
    }

    Ok(HttpResponse::NoContent()
        .cookie(logout_cookie(&config))
        .finish())
}

async fn me(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let (user, _token) = require_auth(&req)?;
    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id,
        email: user.email,
    }))
}

async fn request_password_reset(
    payload: web::Json<PasswordResetRequest>,
    provider_auth: web::Data<ProviderAuth>,
) -> Result<HttpResponse, ApiError> {
    let email = payload.email.trim();
    if email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }

    match provider_auth.request_recovery(email).await {
        Ok(()) => {}
        Err(err) if err.kind() == ProviderErrorKind::RateLimited => {
            return Err(ApiError::RateLimited);
        }
        Err(err) => {
            // Same response either way so the endpoint cannot be used to
            // probe which emails are registered.
            log::warn!("Password recovery request failed: {}", err);
        }
    }

    Ok(HttpResponse::Ok().json(json!({
        "detail": "If that account exists, a reset email is on its way"
    })))
}

async fn reset_password(
    payload: web::Json<NewPasswordRequest>,
    provider_auth: web::Data<ProviderAuth>,
) -> Result<HttpResponse, ApiError> {
    if payload.new_password.chars().count() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }
    if payload.token.is_empty() {
        return Err(ApiError::validation("Reset token is required"));
    }

    provider_auth
        .update_password(&payload.token, &payload.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "detail": "Password updated" })))
}
