// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod calendar;
pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{VisitCreateRequest, VisitRow, VisitUpdateRequest};
pub use repository::VisitRepository;
