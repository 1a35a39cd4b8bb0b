// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Wanderlist keeps a personal map of places worth visiting: save a spot,
//! plan visits, review them afterwards, and let each place's status follow
//! from its visit history. All persistence, auth, and image storage is
//! delegated to a hosted backend provider.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod geocode;
pub mod pages;
pub mod places;
pub mod provider;
pub mod tags;
pub mod templates;
pub mod visits;
