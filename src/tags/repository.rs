// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

use super::models::{PlaceTagRow, Tag};
use crate::error::ApiError;
use crate::provider::{Filter, ProviderDb, ProviderErrorKind};

/// Canonical form of a tag name: trimmed and lowercased. Names that are
/// empty after trimming carry no information and are dropped.
pub fn normalize_name(raw: &str) -> Option<String> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() { None } else { Some(name) }
}

/// Symmetric difference between the desired and current association sets.
/// Returns `(to_add, to_remove)`, each sorted so callers behave
/// deterministically. Applying the result twice is a no-op.
pub fn reconcile_diff(desired: &HashSet<Uuid>, current: &HashSet<Uuid>) -> (Vec<Uuid>, Vec<Uuid>) {
    let mut to_add: Vec<Uuid> = desired.difference(current).copied().collect();
    let mut to_remove: Vec<Uuid> = current.difference(desired).copied().collect();
    to_add.sort();
    to_remove.sort();
    (to_add, to_remove)
}

#[derive(Clone)]
pub struct TagRepository {
    db: ProviderDb,
}

impl TagRepository {
    pub fn new(db: ProviderDb) -> Self {
        Self { db }
    }

    /// All of the owner's tags, sorted by name.
    pub async fn list(&self, token: &str, owner_id: Uuid) -> Result<Vec<Tag>, ApiError> {
        let mut tags: Vec<Tag> = self
            .db
            .select(
                token,
                "tags",
                &[Filter::Eq("owner_id", owner_id.to_string())],
            )
            .await?;
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    /// Look up a tag by normalized name, creating it if absent.
    ///
    /// Two concurrent creations of the same name race on the provider's
    /// per-owner unique constraint; the loser gets a conflict and falls back
    /// to reading the winner's row.
    pub async fn find_or_create(
        &self,
        token: &str,
        owner_id: Uuid,
        name: &str,
    ) -> Result<Tag, ApiError> {
        let filters = [
            Filter::Eq("owner_id", owner_id.to_string()),
            Filter::Eq("name", name.to_string()),
        ];

        let existing: Vec<Tag> = self.db.select(token, "tags", &filters).await?;
        if let Some(tag) = existing.into_iter().next() {
            return Ok(tag);
        }

        let row = Tag {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        match self.db.insert::<Tag, _>(token, "tags", &row).await {
            Ok(tag) => Ok(tag),
            Err(err) if err.kind() == ProviderErrorKind::Conflict => {
                let winners: Vec<Tag> = self.db.select(token, "tags", &filters).await?;
                winners.into_iter().next().ok_or_else(|| {
                    ApiError::internal(format!(
                        "tag '{}' conflicted on insert but cannot be read back",
                        name
                    ))
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn links_for_place(
        &self,
        token: &str,
        place_id: Uuid,
    ) -> Result<Vec<PlaceTagRow>, ApiError> {
        let links = self
            .db
            .select(
                token,
                "place_tags",
                &[Filter::Eq("place_id", place_id.to_string())],
            )
            .await?;
        Ok(links)
    }

    /// Tags attached to one place, sorted by name.
    pub async fn tags_for_place(
        &self,
        token: &str,
        owner_id: Uuid,
        place_id: Uuid,
    ) -> Result<Vec<Tag>, ApiError> {
        let links = self.links_for_place(token, place_id).await?;
        if links.is_empty() {
            return Ok(Vec::new());
        }
        let linked: HashSet<Uuid> = links.into_iter().map(|link| link.tag_id).collect();
        let all = self.list(token, owner_id).await?;
        Ok(all
            .into_iter()
            .filter(|tag| linked.contains(&tag.id))
            .collect())
    }

    async fn link(&self, token: &str, place_id: Uuid, tag_id: Uuid) -> Result<(), ApiError> {
        let row = PlaceTagRow { place_id, tag_id };
        let _stored: PlaceTagRow = self.db.insert(token, "place_tags", &row).await?;
        Ok(())
    }

    async fn unlink(&self, token: &str, place_id: Uuid, tag_id: Uuid) -> Result<(), ApiError> {
        self.db
            .delete(
                token,
                "place_tags",
                &[
                    Filter::Eq("place_id", place_id.to_string()),
                    Filter::Eq("tag_id", tag_id.to_string()),
                ],
            )
            .await?;
        Ok(())
    }

    /// Make the place's associations match `desired_names` exactly.
    ///
    /// Names are normalized first, so duplicates and casing variants in the
    /// input collapse to one association. Tag rows themselves are never
    /// deleted here; an unlinked tag stays available for other places.
    pub async fn reconcile(
        &self,
        token: &str,
        owner_id: Uuid,
        place_id: Uuid,
        desired_names: &[String],
    ) -> Result<(), ApiError> {
        let mut desired = HashSet::new();
        for raw in desired_names {
            if let Some(name) = normalize_name(raw) {
                let tag = self.find_or_create(token, owner_id, &name).await?;
                desired.insert(tag.id);
            }
        }

        let current: HashSet<Uuid> = self
            .links_for_place(token, place_id)
            .await?
            .into_iter()
            .map(|link| link.tag_id)
            .collect();

        let (to_add, to_remove) = reconcile_diff(&desired, &current);
        for tag_id in to_add {
            self.link(token, place_id, tag_id).await?;
        }
        for tag_id in to_remove {
            self.unlink(token, place_id, tag_id).await?;
        }
        Ok(())
    }
}
