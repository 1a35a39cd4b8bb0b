// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::Utc;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use super::models::{Place, PlaceCreateRequest, PlaceRow, PlaceStatus, PlaceUpdateRequest};
use crate::error::ApiError;
use crate::geocode::GeocodeClient;
use crate::provider::{Filter, ProviderDb, ProviderStorage};
use crate::tags::TagRepository;
use crate::visits::VisitRow;

#[derive(Clone)]
pub struct PlaceRepository {
    db: ProviderDb,
    tags: TagRepository,
    storage: ProviderStorage,
    geocode: GeocodeClient,
}

impl PlaceRepository {
    pub fn new(
        db: ProviderDb,
        tags: TagRepository,
        storage: ProviderStorage,
        geocode: GeocodeClient,
    ) -> Self {
        Self {
            db,
            tags,
            storage,
            geocode,
        }
    }

    /// Resolve the IANA zone for a coordinate pair. The lookup service being
    /// down must never block a write, so failures degrade to `None`.
    async fn timezone_for(&self, latitude: f64, longitude: f64) -> Option<String> {
        match self.geocode.timezone_for(latitude, longitude).await {
            Ok(timezone) => timezone,
            Err(err) => {
                log::warn!(
                    "Timezone lookup failed for ({}, {}): {}",
                    latitude,
                    longitude,
                    err
                );
                None
            }
        }
    }

    pub async fn create(
        &self,
        token: &str,
        owner_id: Uuid,
        request: PlaceCreateRequest,
    ) -> Result<Place, ApiError> {
        let now = Utc::now();
        let timezone = self.timezone_for(request.latitude, request.longitude).await;

        let row = PlaceRow {
            id: Uuid::new_v4(),
            owner_id,
            name: request.name.trim().to_string(),
            category: request.category,
            latitude: request.latitude,
            longitude: request.longitude,
            address: request.address,
            city: request.city,
            country: request.country,
            timezone,
            status: PlaceStatus::Pending,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let stored: PlaceRow = self.db.insert(token, "places", &row).await?;

        if let Some(names) = &request.tags
            && let Err(err) = self.tags.reconcile(token, owner_id, stored.id, names).await
        {
            log::error!("Tag reconciliation failed for new place {}: {}", stored.id, err);
        }

        self.compose(token, stored).await
    }

    /// The owner's places, newest first. Soft-deleted rows appear only when
    /// `include_deleted` is set.
    pub async fn list(
        &self,
        token: &str,
        owner_id: Uuid,
        include_deleted: bool,
    ) -> Result<Vec<PlaceRow>, ApiError> {
        let mut filters = vec![Filter::Eq("owner_id", owner_id.to_string())];
        if !include_deleted {
            filters.push(Filter::IsNull("deleted_at"));
        }
        let mut rows: Vec<PlaceRow> = self.db.select(token, "places", &filters).await?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn fetch_row(
        &self,
        token: &str,
        owner_id: Uuid,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<PlaceRow, ApiError> {
        let mut filters = vec![
            Filter::Eq("id", id.to_string()),
            Filter::Eq("owner_id", owner_id.to_string()),
        ];
        if !include_deleted {
            filters.push(Filter::IsNull("deleted_at"));
        }
        let rows: Vec<PlaceRow> = self.db.select(token, "places", &filters).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound)
    }

    pub async fn get(
        &self,
        token: &str,
        owner_id: Uuid,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Place, ApiError> {
        let row = self.fetch_row(token, owner_id, id, include_deleted).await?;
        self.compose(token, row).await
    }

    async fn compose(&self, token: &str, row: PlaceRow) -> Result<Place, ApiError> {
        let tags = self.tags.tags_for_place(token, row.owner_id, row.id).await?;
        let mut visits: Vec<VisitRow> = self
            .db
            .select(
                token,
                "visits",
                &[
                    Filter::Eq("place_id", row.id.to_string()),
                    Filter::Eq("owner_id", row.owner_id.to_string()),
                    Filter::IsNull("deleted_at"),
                ],
            )
            .await?;
        visits.sort_by(|a, b| a.visited_at.cmp(&b.visited_at));
        Ok(Place { row, tags, visits })
    }

    pub async fn update(
        &self,
        token: &str,
        owner_id: Uuid,
        id: Uuid,
        request: PlaceUpdateRequest,
    ) -> Result<Place, ApiError> {
        let current = self.fetch_row(token, owner_id, id, false).await?;

        let mut changes = Map::new();
        if let Some(name) = &request.name {
            changes.insert("name".to_string(), json!(name.trim()));
        }
        if let Some(category) = request.category {
            changes.insert("category".to_string(), json!(category));
        }
        if let Some(latitude) = request.latitude {
            changes.insert("latitude".to_string(), json!(latitude));
        }
        if let Some(longitude) = request.longitude {
            changes.insert("longitude".to_string(), json!(longitude));
        }
        if let Some(address) = &request.address {
            changes.insert("address".to_string(), json!(address));
        }
        if let Some(city) = &request.city {
            changes.insert("city".to_string(), json!(city));
        }
        if let Some(country) = &request.country {
            changes.insert("country".to_string(), json!(country));
        }
        if let Some(status) = request.status {
            changes.insert("status".to_string(), json!(status));
        }

        // A moved pin gets a fresh timezone; a failed lookup keeps the old one.
        if request.latitude.is_some() || request.longitude.is_some() {
            let latitude = request.latitude.unwrap_or(current.latitude);
            let longitude = request.longitude.unwrap_or(current.longitude);
            if let Some(timezone) = self.timezone_for(latitude, longitude).await {
                changes.insert("timezone".to_string(), json!(timezone));
            }
        }

        changes.insert("updated_at".to_string(), json!(Utc::now()));

        let rows: Vec<PlaceRow> = self
            .db
            .update(
                token,
                "places",
                &[
                    Filter::Eq("id", id.to_string()),
                    Filter::Eq("owner_id", owner_id.to_string()),
                    Filter::IsNull("deleted_at"),
                ],
                &Value::Object(changes),
            )
            .await?;
        let updated = rows
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound)?;

        if let Some(names) = &request.tags
            && let Err(err) = self.tags.reconcile(token, owner_id, id, names).await
        {
            // The field update already committed; report it as a success and
            // leave the associations for the next update to converge.
            log::error!("Tag reconciliation failed for place {}: {}", id, err);
        }

        self.compose(token, updated).await
    }

    /// Cascade delete: remove every child visit's image object with the
    /// administrative credential, then soft-delete the place. Visit rows stay
    /// in place behind the place's deleted flag.
    pub async fn delete(&self, token: &str, owner_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        self.fetch_row(token, owner_id, id, false).await?;

        let visits: Vec<VisitRow> = self
            .db
            .select(
                token,
                "visits",
                &[
                    Filter::Eq("place_id", id.to_string()),
                    Filter::Eq("owner_id", owner_id.to_string()),
                ],
            )
            .await?;
        for visit in &visits {
            if let Some(path) = &visit.image_path {
                self.storage.delete_object(path).await?;
            }
        }

        let now = Utc::now();
        let rows: Vec<PlaceRow> = self
            .db
            .update(
                token,
                "places",
                &[
                    Filter::Eq("id", id.to_string()),
                    Filter::Eq("owner_id", owner_id.to_string()),
                ],
                &json!({ "deleted_at": now, "updated_at": now }),
            )
            .await?;
        if rows.is_empty() {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}
