// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::provider::{ProviderError, ProviderErrorKind};

/// API-facing error taxonomy. Internal detail is logged server-side; clients
/// only ever see the generic detail string.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or semantically invalid input (422).
    Validation(String),
    /// Missing, invalid, or expired credentials (401). The detail never
    /// reveals whether an email is registered.
    Unauthorized,
    /// Unknown resource, including resources owned by somebody else (404).
    NotFound,
    /// Conflicting state upstream, e.g. duplicate rows (409).
    Conflict(String),
    /// The provider told us to slow down (429).
    RateLimited,
    /// The provider could not be reached or is down (503).
    Unavailable(String),
    /// Anything unexpected (500).
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    fn public_detail(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Unauthorized => "Not authenticated".to_string(),
            ApiError::NotFound => "Not found".to_string(),
            ApiError::Conflict(msg) => msg.clone(),
            ApiError::RateLimited => "Too many requests".to_string(),
            ApiError::Unavailable(_) => "Service temporarily unavailable".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Unauthorized => write!(f, "Not authenticated"),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::RateLimited => write!(f, "Rate limited"),
            ApiError::Unavailable(msg) => write!(f, "Provider unavailable: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Unavailable(detail) => {
                log::error!("Provider unavailable: {}", detail);
            }
            ApiError::Internal(detail) => {
                log::error!("Internal error: {}", detail);
            }
            _ => {}
        }
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.public_detail() }))
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err.kind() {
            ProviderErrorKind::Unauthorized => ApiError::Unauthorized,
            ProviderErrorKind::Conflict => ApiError::Conflict(err.message().to_string()),
            ProviderErrorKind::RateLimited => ApiError::RateLimited,
            ProviderErrorKind::Unavailable => ApiError::Unavailable(err.to_string()),
            ProviderErrorKind::Internal => ApiError::Internal(err.to_string()),
        }
    }
}
