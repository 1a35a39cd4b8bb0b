// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use reqwest::Method;
use std::sync::Arc;

use super::{ProviderCore, ProviderError};

/// Object storage client for visit images.
///
/// Uploads run with the owning user's token; deletes run with the
/// service-role credential because cascading cleanup (place delete) must be
/// able to remove objects regardless of storage policies.
#[derive(Clone)]
pub struct ProviderStorage {
    core: Arc<ProviderCore>,
    bucket: String,
}

impl ProviderStorage {
    pub fn new(core: Arc<ProviderCore>, bucket: impl Into<String>) -> Self {
        Self {
            core,
            bucket: bucket.into(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.core.base_url(),
            self.bucket,
            path
        )
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.core.base_url(),
            self.bucket,
            path
        )
    }

    pub async fn upload(
        &self,
        token: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ProviderError> {
        let url = self.object_url(path);
        let response = self
            .core
            .request_as_user(Method::POST, &url, token)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(ProviderError::transport)?;
        ProviderCore::check(response).await?;
        Ok(())
    }

    /// Remove an object with the administrative credential.
    pub async fn delete_object(&self, path: &str) -> Result<(), ProviderError> {
        let url = self.object_url(path);
        let response = self
            .core
            .request_as_service(Method::DELETE, &url)
            .send()
            .await
            .map_err(ProviderError::transport)?;
        ProviderCore::check(response).await?;
        Ok(())
    }
}
