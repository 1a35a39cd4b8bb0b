// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Thin client for the hosted backend provider: a PostgREST-style rows API,
//! a GoTrue-style auth API, and an object storage API. Everything here is
//! plumbing; persistence and authentication semantics live upstream.

use reqwest::{Client, Method, RequestBuilder, Response};
use std::sync::Arc;

use crate::config::ProviderConfig;

mod auth;
mod db;
mod storage;

pub use auth::{AuthSession, AuthUser, ProviderAuth};
pub use db::{Filter, ProviderDb, query_string};
pub use storage::ProviderStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Unauthorized,
    Conflict,
    RateLimited,
    Unavailable,
    Internal,
}

#[derive(Debug)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    status: Option<u16>,
    message: String,
}

impl ProviderError {
    pub fn from_response(status: u16, message: &str) -> Self {
        Self {
            kind: classify_message(status, message),
            status: Some(status),
            message: message.to_string(),
        }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        Self {
            kind: ProviderErrorKind::Unavailable,
            status: None,
            message: err.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Internal,
            status: None,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "provider returned {}: {}", status, self.message),
            None => write!(f, "provider unreachable: {}", self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Classify a provider error by status code and message substrings.
///
/// The provider does not expose a stable machine-readable error code for
/// every failure, so this falls back to substring matching on the message.
/// Fragile, but the alternative is treating everything as a 500.
pub fn classify_message(status: u16, message: &str) -> ProviderErrorKind {
    let lower = message.to_ascii_lowercase();
    if status == 401
        || status == 403
        || lower.contains("jwt expired")
        || lower.contains("invalid jwt")
        || lower.contains("invalid token")
        || lower.contains("invalid login credentials")
    {
        ProviderErrorKind::Unauthorized
    } else if status == 409
        || lower.contains("duplicate key")
        || lower.contains("already registered")
        || lower.contains("already exists")
    {
        ProviderErrorKind::Conflict
    } else if status == 429 || lower.contains("rate limit") || lower.contains("too many requests") {
        ProviderErrorKind::RateLimited
    } else if status == 502 || status == 503 || status == 504 {
        ProviderErrorKind::Unavailable
    } else {
        ProviderErrorKind::Internal
    }
}

/// Shared connection state for all provider sub-clients: one HTTP client,
/// the project URL, and both credentials. Constructed once at startup and
/// injected wherever needed, never cached at module level.
pub struct ProviderCore {
    http: Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

impl ProviderCore {
    pub fn new(config: &ProviderConfig) -> Result<Arc<Self>, ProviderError> {
        let http = Client::builder()
            .build()
            .map_err(ProviderError::transport)?;
        Ok(Arc::new(Self {
            http,
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
        }))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request authenticated with the caller's own bearer token.
    fn request_as_user(&self, method: Method, url: &str, token: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    /// Request authenticated with the administrative service-role key.
    fn request_as_service(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.service_role_key)
    }

    /// Request carrying only the anon key (pre-authentication auth calls).
    fn request_anonymous(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
    }

    async fn check(response: Response) -> Result<Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let code = status.as_u16();
        let message = response.text().await.unwrap_or_else(|_| String::new());
        Err(ProviderError::from_response(code, &message))
    }
}
