// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// A planned or past visit to a place. `visited_at` in the future means the
/// visit is scheduled; rating and review fields mark it as reviewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub place_id: Uuid,
    pub visited_at: DateTime<Utc>,
    /// 1 to 5 when present.
    pub rating: Option<i32>,
    pub review_title: Option<String>,
    pub review_text: Option<String>,
    /// Object path inside the image bucket, `{owner_id}/{visit_id}`.
    pub image_path: Option<String>,
    /// Calendar alarm lead time. No reminder when absent.
    pub reminder_minutes_before: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct VisitCreateRequest {
    pub visited_at: DateTime<Utc>,
    pub rating: Option<i32>,
    pub review_title: Option<String>,
    pub review_text: Option<String>,
    pub reminder_minutes_before: Option<i64>,
}

impl VisitCreateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_rating(self.rating)?;
        validate_reminder(self.reminder_minutes_before)
    }
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct VisitUpdateRequest {
    pub visited_at: Option<DateTime<Utc>>,
    pub rating: Option<i32>,
    pub review_title: Option<String>,
    pub review_text: Option<String>,
    pub reminder_minutes_before: Option<i64>,
}

impl VisitUpdateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_rating(self.rating)?;
        validate_reminder(self.reminder_minutes_before)
    }
}

fn validate_rating(rating: Option<i32>) -> Result<(), ApiError> {
    match rating {
        Some(value) if !(1..=5).contains(&value) => {
            Err(ApiError::validation("Rating must be between 1 and 5"))
        }
        _ => Ok(()),
    }
}

fn validate_reminder(minutes: Option<i64>) -> Result<(), ApiError> {
    match minutes {
        Some(value) if value < 0 => {
            Err(ApiError::validation("Reminder lead time cannot be negative"))
        }
        _ => Ok(()),
    }
}
