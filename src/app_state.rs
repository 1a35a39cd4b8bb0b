// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::templates::{MiniJinjaEngine, TemplateEngine};

pub struct AppState {
    pub templates: Arc<dyn TemplateEngine>,
    pub app_name: String,
}

impl AppState {
    pub fn new(app_name: &str) -> Self {
        Self {
            templates: Arc::new(MiniJinjaEngine::new()),
            app_name: app_name.to_string(),
        }
    }
}
