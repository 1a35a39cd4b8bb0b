// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner-scoped tag. `name` is stored normalized (trimmed, lowercased) and is
/// unique per owner at the database level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Place-to-tag association row. No attributes of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceTagRow {
    pub place_id: Uuid,
    pub tag_id: Uuid,
}
