// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Cookie-based auth glue. There is no local session store and no local
//! token verification: the cookie carries the provider's bearer token and the
//! middleware validates it upstream on every request.

pub mod cookie;
pub mod handlers;
pub mod middleware;
pub mod types;

pub use middleware::{AuthMiddlewareFactory, AuthRequest, require_auth};
pub use types::{AccessToken, CurrentUser};
