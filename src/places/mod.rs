// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Places are the root entity: everything else (visits, tags, images) hangs
//! off a place and is scoped to its owner.

pub mod handlers;
pub mod models;
pub mod repository;
pub mod status;

pub use models::{Place, PlaceCategory, PlaceCreateRequest, PlaceRow, PlaceStatus, PlaceUpdateRequest};
pub use repository::PlaceRepository;
pub use status::derive_status;
