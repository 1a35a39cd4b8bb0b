// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

/// The versioned JSON API. Handlers enforce authentication themselves so the
/// auth endpoints can live under the same scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(crate::auth::handlers::configure)
            .configure(crate::places::handlers::configure)
            .configure(crate::visits::handlers::configure)
            .configure(crate::tags::handlers::configure)
            .configure(crate::geocode::configure),
    );
}
