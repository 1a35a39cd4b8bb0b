// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::{Environment, Value, context, default_auto_escape_callback};

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

/// Template loader for minijinja that loads from embedded sources
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        "pages/index.html" => Some(include_str!("pages/templates/index.html")),
        "pages/login.html" => Some(include_str!("pages/templates/login.html")),
        "pages/signup.html" => Some(include_str!("pages/templates/signup.html")),
        "pages/request_password_reset.html" => {
            Some(include_str!("pages/templates/request_password_reset.html"))
        }
        "pages/reset_password.html" => Some(include_str!("pages/templates/reset_password.html")),
        "pages/error_500.html" => Some(include_str!("pages/templates/error_500.html")),
        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}

/// Context for the simple auth and error pages.
#[derive(Debug, Clone)]
pub struct PageContext {
    app_name: String,
}

impl PageContext {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name
        }
    }
}

/// Context for the map dashboard.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    app_name: String,
    user_email: String,
}

impl DashboardContext {
    pub fn new(app_name: &str, user_email: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            user_email: user_email.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            user_email => &self.user_email
        }
    }
}
