// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::Serialize;
use uuid::Uuid;

/// Identity attached to the request after the provider validated the cookie
/// token. Owner scoping everywhere keys off `id`.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

/// The raw bearer token from the auth cookie, kept alongside the user so
/// repositories can forward it to the provider's row-level security.
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);
