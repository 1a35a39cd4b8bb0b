// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::tags::Tag;
use crate::visits::VisitRow;

/// Lifecycle state of a place. Derived from its visits after every visit
/// mutation; `Prioritized` is the only state set directly by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceStatus {
    Pending,
    Prioritized,
    Scheduled,
    Visited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Restaurant,
    Cafe,
    Bar,
    Museum,
    Park,
    Viewpoint,
    Shop,
    Hotel,
    Other,
}

/// A place as stored. Soft-deleted rows keep their data and are excluded
/// from reads unless the caller asks for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub category: PlaceCategory,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// IANA zone name resolved from the coordinates; absent when the lookup
    /// service was unreachable at write time.
    pub timezone: Option<String>,
    pub status: PlaceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fully composed place returned by the detail endpoint: the row plus its
/// tags (by name order) and visits (by visit time).
#[derive(Debug, Clone, Serialize)]
pub struct Place {
    #[serde(flatten)]
    pub row: PlaceRow,
    pub tags: Vec<Tag>,
    pub visits: Vec<VisitRow>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceCreateRequest {
    pub name: String,
    pub category: PlaceCategory,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PlaceCreateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("Place name is required"));
        }
        validate_coordinates(self.latitude, self.longitude)
    }
}

/// Partial update. `None` means "leave unchanged"; the status field lets the
/// user pin `prioritized` (or reset to `pending`) by hand.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceUpdateRequest {
    pub name: Option<String>,
    pub category: Option<PlaceCategory>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub status: Option<PlaceStatus>,
    pub tags: Option<Vec<String>>,
}

impl PlaceUpdateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(ApiError::validation("Place name cannot be empty"));
        }
        if let Some(latitude) = self.latitude
            && !(-90.0..=90.0).contains(&latitude)
        {
            return Err(ApiError::validation("Latitude must be between -90 and 90"));
        }
        if let Some(longitude) = self.longitude
            && !(-180.0..=180.0).contains(&longitude)
        {
            return Err(ApiError::validation(
                "Longitude must be between -180 and 180",
            ));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.country.is_none()
            && self.status.is_none()
            && self.tags.is_none()
    }
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ApiError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::validation("Latitude must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::validation(
            "Longitude must be between -180 and 180",
        ));
    }
    Ok(())
}
