// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{DateTime, Utc};

use super::models::PlaceStatus;
use crate::visits::VisitRow;

/// Recompute a place's status from its visible visits.
///
/// Precedence, first match wins:
/// 1. any visit at or after `now` -> `Scheduled`
/// 2. any strictly-past visit with a rating or review -> `Visited`
/// 3. current status is `Prioritized` -> keep it
/// 4. otherwise -> `Pending`
///
/// An empty visit list falls through to rules 3 and 4, so a manual
/// prioritization survives deleting every visit.
pub fn derive_status(
    visits: &[VisitRow],
    current: PlaceStatus,
    now: DateTime<Utc>,
) -> PlaceStatus {
    if visits.iter().any(|visit| visit.visited_at >= now) {
        return PlaceStatus::Scheduled;
    }
    if visits
        .iter()
        .any(|visit| visit.visited_at < now && is_reviewed(visit))
    {
        return PlaceStatus::Visited;
    }
    if current == PlaceStatus::Prioritized {
        return PlaceStatus::Prioritized;
    }
    PlaceStatus::Pending
}

fn is_reviewed(visit: &VisitRow) -> bool {
    visit.rating.is_some()
        || has_text(visit.review_title.as_deref())
        || has_text(visit.review_text.as_deref())
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}
