// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{ProviderCore, ProviderError};

/// Row filter rendered into the provider's query-string syntax.
#[derive(Debug, Clone)]
pub enum Filter {
    Eq(&'static str, String),
    IsNull(&'static str),
}

/// Render filters as `col=eq.value&other=is.null`. Values are
/// percent-encoded; columns are trusted compile-time names.
pub fn query_string(filters: &[Filter]) -> String {
    let parts: Vec<String> = filters
        .iter()
        .map(|filter| match filter {
            Filter::Eq(column, value) => {
                format!("{}=eq.{}", column, urlencoding::encode(value))
            }
            Filter::IsNull(column) => format!("{}=is.null", column),
        })
        .collect();
    parts.join("&")
}

/// Rows API client. Every call carries the requesting user's bearer token so
/// the provider's row-level security applies; this layer never widens access.
#[derive(Clone)]
pub struct ProviderDb {
    core: Arc<ProviderCore>,
}

impl ProviderDb {
    pub fn new(core: Arc<ProviderCore>) -> Self {
        Self { core }
    }

    fn table_url(&self, table: &str, filters: &[Filter], select: bool) -> String {
        let mut query = query_string(filters);
        if select {
            if query.is_empty() {
                query = "select=*".to_string();
            } else {
                query.push_str("&select=*");
            }
        }
        if query.is_empty() {
            format!("{}/rest/v1/{}", self.core.base_url(), table)
        } else {
            format!("{}/rest/v1/{}?{}", self.core.base_url(), table, query)
        }
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        filters: &[Filter],
    ) -> Result<Vec<T>, ProviderError> {
        let url = self.table_url(table, filters, true);
        let response = self
            .core
            .request_as_user(Method::GET, &url, token)
            .send()
            .await
            .map_err(ProviderError::transport)?;
        let response = ProviderCore::check(response).await?;
        response.json().await.map_err(ProviderError::transport)
    }

    /// Insert a single row and return the stored representation.
    pub async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        token: &str,
        table: &str,
        row: &B,
    ) -> Result<T, ProviderError> {
        let url = self.table_url(table, &[], false);
        let response = self
            .core
            .request_as_user(Method::POST, &url, token)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(ProviderError::transport)?;
        let response = ProviderCore::check(response).await?;
        let mut rows: Vec<T> = response.json().await.map_err(ProviderError::transport)?;
        rows.pop()
            .ok_or_else(|| ProviderError::internal(format!("insert into {} returned no rows", table)))
    }

    /// Patch all rows matching the filters and return the updated rows.
    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        token: &str,
        table: &str,
        filters: &[Filter],
        changes: &B,
    ) -> Result<Vec<T>, ProviderError> {
        let url = self.table_url(table, filters, false);
        let response = self
            .core
            .request_as_user(Method::PATCH, &url, token)
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await
            .map_err(ProviderError::transport)?;
        let response = ProviderCore::check(response).await?;
        response.json().await.map_err(ProviderError::transport)
    }

    /// Hard-delete matching rows. Only used for association rows; entity
    /// tables are soft-deleted through [`ProviderDb::update`].
    pub async fn delete(
        &self,
        token: &str,
        table: &str,
        filters: &[Filter],
    ) -> Result<(), ProviderError> {
        let url = self.table_url(table, filters, false);
        let response = self
            .core
            .request_as_user(Method::DELETE, &url, token)
            .send()
            .await
            .map_err(ProviderError::transport)?;
        ProviderCore::check(response).await?;
        Ok(())
    }
}
