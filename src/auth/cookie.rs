// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

use crate::config::ValidatedConfig;

/// Session cookie carrying the provider's bearer token. HTTP-only so page
/// scripts never see the token; the map dashboard talks to our own API.
pub fn auth_cookie(config: &ValidatedConfig, token: &str) -> Cookie<'static> {
    Cookie::build(config.auth.cookie_name.clone(), token.to_string())
        .path("/")
        .http_only(true)
        .secure(config.auth.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(config.auth.session_hours))
        .finish()
}

/// Expired replacement cookie used on logout.
pub fn logout_cookie(config: &ValidatedConfig) -> Cookie<'static> {
    Cookie::build(config.auth.cookie_name.clone(), String::new())
        .path("/")
        .http_only(true)
        .secure(config.auth.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .finish()
}
