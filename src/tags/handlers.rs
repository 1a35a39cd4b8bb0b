// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};

use super::repository::TagRepository;
use crate::auth::require_auth;
use crate::error::ApiError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/tags/", web::get().to(list_tags));
}

/// Every tag the caller owns, including tags no place currently uses.
async fn list_tags(
    req: HttpRequest,
    tags: web::Data<TagRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let tags = tags.list(&token, user.id).await?;
    Ok(HttpResponse::Ok().json(tags))
}
