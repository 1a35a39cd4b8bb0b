// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::Utc;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use super::models::{VisitCreateRequest, VisitRow, VisitUpdateRequest};
use crate::error::ApiError;
use crate::places::models::PlaceRow;
use crate::places::status::derive_status;
use crate::provider::{Filter, ProviderDb, ProviderStorage};

#[derive(Clone)]
pub struct VisitRepository {
    db: ProviderDb,
    storage: ProviderStorage,
}

impl VisitRepository {
    pub fn new(db: ProviderDb, storage: ProviderStorage) -> Self {
        Self { db, storage }
    }

    pub(crate) async fn require_place(
        &self,
        token: &str,
        owner_id: Uuid,
        place_id: Uuid,
    ) -> Result<PlaceRow, ApiError> {
        let rows: Vec<PlaceRow> = self
            .db
            .select(
                token,
                "places",
                &[
                    Filter::Eq("id", place_id.to_string()),
                    Filter::Eq("owner_id", owner_id.to_string()),
                    Filter::IsNull("deleted_at"),
                ],
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound)
    }

    pub async fn create(
        &self,
        token: &str,
        owner_id: Uuid,
        place_id: Uuid,
        request: VisitCreateRequest,
    ) -> Result<VisitRow, ApiError> {
        self.require_place(token, owner_id, place_id).await?;

        let now = Utc::now();
        let row = VisitRow {
            id: Uuid::new_v4(),
            owner_id,
            place_id,
            visited_at: request.visited_at,
            rating: request.rating,
            review_title: request.review_title,
            review_text: request.review_text,
            image_path: None,
            reminder_minutes_before: request.reminder_minutes_before,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let stored: VisitRow = self.db.insert(token, "visits", &row).await?;
        self.recompute_status_logged(token, owner_id, place_id).await;
        Ok(stored)
    }

    pub async fn list_for_place(
        &self,
        token: &str,
        owner_id: Uuid,
        place_id: Uuid,
    ) -> Result<Vec<VisitRow>, ApiError> {
        self.require_place(token, owner_id, place_id).await?;
        let mut visits = self.visible_visits(token, owner_id, place_id).await?;
        visits.sort_by(|a, b| a.visited_at.cmp(&b.visited_at));
        Ok(visits)
    }

    pub async fn get(&self, token: &str, owner_id: Uuid, id: Uuid) -> Result<VisitRow, ApiError> {
        let rows: Vec<VisitRow> = self
            .db
            .select(
                token,
                "visits",
                &[
                    Filter::Eq("id", id.to_string()),
                    Filter::Eq("owner_id", owner_id.to_string()),
                    Filter::IsNull("deleted_at"),
                ],
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound)
    }

    pub async fn update(
        &self,
        token: &str,
        owner_id: Uuid,
        id: Uuid,
        request: VisitUpdateRequest,
    ) -> Result<VisitRow, ApiError> {
        let mut changes = Map::new();
        if let Some(visited_at) = request.visited_at {
            changes.insert("visited_at".to_string(), json!(visited_at));
        }
        if let Some(rating) = request.rating {
            changes.insert("rating".to_string(), json!(rating));
        }
        if let Some(review_title) = &request.review_title {
            changes.insert("review_title".to_string(), json!(review_title));
        }
        if let Some(review_text) = &request.review_text {
            changes.insert("review_text".to_string(), json!(review_text));
        }
        if let Some(minutes) = request.reminder_minutes_before {
            changes.insert("reminder_minutes_before".to_string(), json!(minutes));
        }
        changes.insert("updated_at".to_string(), json!(Utc::now()));

        let rows: Vec<VisitRow> = self
            .db
            .update(
                token,
                "visits",
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

        self.recompute_status_logged(token, owner_id, updated.place_id)
            .await;
        Ok(updated)
    }

    /// Delete a visit: its image object goes first, then the row is
    /// soft-deleted, then the parent place's status is recomputed. A failed
    /// image delete aborts and leaves the visit intact.
    pub async fn delete(&self, token: &str, owner_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let visit = self.get(token, owner_id, id).await?;

        if let Some(path) = &visit.image_path {
            self.storage.delete_object(path).await?;
        }

        let now = Utc::now();
        let _rows: Vec<VisitRow> = self
            .db
            .update(
                token,
                "visits",
                &[
                    Filter::Eq("id", id.to_string()),
                    Filter::Eq("owner_id", owner_id.to_string()),
                ],
                &json!({ "deleted_at": now, "updated_at": now }),
            )
            .await?;

        self.recompute_status_logged(token, owner_id, visit.place_id)
            .await;
        Ok(())
    }

    /// Attach an uploaded image to a visit. The object is written under
    /// `{owner_id}/{visit_id}` so re-uploads replace the old image in place.
    pub async fn set_image(
        &self,
        token: &str,
        owner_id: Uuid,
        id: Uuid,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<VisitRow, ApiError> {
        self.get(token, owner_id, id).await?;

        let path = format!("{}/{}", owner_id, id);
        self.storage.upload(token, &path, bytes, content_type).await?;

        let rows: Vec<VisitRow> = self
            .db
            .update(
                token,
                "visits",
                &[
                    Filter::Eq("id", id.to_string()),
                    Filter::Eq("owner_id", owner_id.to_string()),
                    Filter::IsNull("deleted_at"),
                ],
                &json!({ "image_path": path, "updated_at": Utc::now() }),
            )
            .await
            .inspect_err(|err| {
                // The object landed but no row points at it; flag it for
                // manual cleanup, there is no automatic retry.
                log::warn!(
                    "Orphaned upload at {} for visit {}: record update failed: {}",
                    path,
                    id,
                    err
                );
            })?;
        rows.into_iter().next().ok_or_else(|| {
            log::warn!("Orphaned upload at {} for visit {}: visit row vanished", path, id);
            ApiError::NotFound
        })
    }

    pub fn image_url(&self, visit: &VisitRow) -> Option<String> {
        visit
            .image_path
            .as_deref()
            .map(|path| self.storage.public_url(path))
    }

    async fn visible_visits(
        &self,
        token: &str,
        owner_id: Uuid,
        place_id: Uuid,
    ) -> Result<Vec<VisitRow>, ApiError> {
        let visits = self
            .db
            .select(
                token,
                "visits",
                &[
                    Filter::Eq("place_id", place_id.to_string()),
                    Filter::Eq("owner_id", owner_id.to_string()),
                    Filter::IsNull("deleted_at"),
                ],
            )
            .await?;
        Ok(visits)
    }

    /// Re-derive the parent place's status after a visit mutation. Best
    /// effort: the mutation already committed, so a failure here only leaves
    /// the status stale until the next recomputation.
    async fn recompute_status_logged(&self, token: &str, owner_id: Uuid, place_id: Uuid) {
        if let Err(err) = self.recompute_status(token, owner_id, place_id).await {
            log::error!("Status recomputation failed for place {}: {}", place_id, err);
        }
    }

    async fn recompute_status(
        &self,
        token: &str,
        owner_id: Uuid,
        place_id: Uuid,
    ) -> Result<(), ApiError> {
        let place = self.require_place(token, owner_id, place_id).await?;
        let visits = self.visible_visits(token, owner_id, place_id).await?;
        let status = derive_status(&visits, place.status, Utc::now());
        if status == place.status {
            return Ok(());
        }
        let _rows: Vec<PlaceRow> = self
            .db
            .update(
                token,
                "places",
                &[
                    Filter::Eq("id", place_id.to_string()),
                    Filter::Eq("owner_id", owner_id.to_string()),
                ],
                &json!({ "status": status, "updated_at": Utc::now() }),
            )
            .await?;
        Ok(())
    }
}
