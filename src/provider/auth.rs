// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::{ProviderCore, ProviderError};

/// The provider's view of an authenticated user. No local user records exist;
/// this is the whole identity.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// Auth API client. Token issuance, verification, and password handling all
/// happen upstream; this just shuttles credentials back and forth.
#[derive(Clone)]
pub struct ProviderAuth {
    core: Arc<ProviderCore>,
}

impl ProviderAuth {
    pub fn new(core: Arc<ProviderCore>) -> Self {
        Self { core }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.core.base_url(), path)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, ProviderError> {
        let url = self.auth_url("signup");
        let response = self
            .core
            .request_anonymous(Method::POST, &url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ProviderError::transport)?;
        let response = ProviderCore::check(response).await?;
        response.json().await.map_err(ProviderError::transport)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, ProviderError> {
        let url = format!("{}?grant_type=password", self.auth_url("token"));
        let response = self
            .core
            .request_anonymous(Method::POST, &url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ProviderError::transport)?;
        let response = ProviderCore::check(response).await?;
        response.json().await.map_err(ProviderError::transport)
    }

    /// Validate a bearer token and return the user it belongs to. Called on
    /// every authenticated request; there is no local session cache.
    pub async fn get_user(&self, token: &str) -> Result<AuthUser, ProviderError> {
        let url = self.auth_url("user");
        let response = self
            .core
            .request_as_user(Method::GET, &url, token)
            .send()
            .await
            .map_err(ProviderError::transport)?;
        let response = ProviderCore::check(response).await?;
        response.json().await.map_err(ProviderError::transport)
    }

    /// Revoke the token upstream.
    pub async fn sign_out(&self, token: &str) -> Result<(), ProviderError> {
        let url = self.auth_url("logout");
        let response = self
            .core
            .request_as_user(Method::POST, &url, token)
            .send()
            .await
            .map_err(ProviderError::transport)?;
        ProviderCore::check(response).await?;
        Ok(())
    }

    /// Ask the provider to email a password-recovery link.
    pub async fn request_recovery(&self, email: &str) -> Result<(), ProviderError> {
        let url = self.auth_url("recover");
        let response = self
            .core
            .request_anonymous(Method::POST, &url)
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(ProviderError::transport)?;
        ProviderCore::check(response).await?;
        Ok(())
    }

    /// Set a new password using the recovery token from the reset email.
    pub async fn update_password(
        &self,
        recovery_token: &str,
        new_password: &str,
    ) -> Result<(), ProviderError> {
        let url = self.auth_url("user");
        let response = self
            .core
            .request_as_user(Method::PUT, &url, recovery_token)
            .json(&json!({ "password": new_password }))
            .send()
            .await
            .map_err(ProviderError::transport)?;
        ProviderCore::check(response).await?;
        Ok(())
    }
}
