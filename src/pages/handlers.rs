// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! HTML page routes. The pages are thin shells; all data flows through the
//! JSON API, authenticated by the same cookie.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::app_state::AppState;
use crate::auth::AuthRequest;
use crate::templates::{DashboardContext, PageContext};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/login", web::get().to(login_page))
        .route("/signup", web::get().to(signup_page))
        .route(
            "/request-password-reset",
            web::get().to(request_password_reset_page),
        )
        .route("/reset-password", web::get().to(reset_password_page))
        .route("/health", web::get().to(health));
}

fn render_page(state: &AppState, template: &str, context: minijinja::Value) -> HttpResponse {
    match state.templates.render(template, context) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(err) => {
            log::error!("Failed to render {}: {}", template, err);
            let fallback = state
                .templates
                .render(
                    "pages/error_500.html",
                    PageContext::new(&state.app_name).to_value(),
                )
                .unwrap_or_else(|_| "Internal server error".to_string());
            HttpResponse::InternalServerError()
                .content_type("text/html; charset=utf-8")
                .body(fallback)
        }
    }
}

/// Map dashboard. Anonymous visitors go to the login page instead.
async fn index(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let Some(user) = req.current_user() else {
        return HttpResponse::Found()
            .insert_header((header::LOCATION, "/login"))
            .finish();
    };
    let context = DashboardContext::new(&state.app_name, &user.email);
    render_page(&state, "pages/index.html", context.to_value())
}

async fn login_page(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if req.is_authenticated() {
        return HttpResponse::Found()
            .insert_header((header::LOCATION, "/"))
            .finish();
    }
    render_page(
        &state,
        "pages/login.html",
        PageContext::new(&state.app_name).to_value(),
    )
}

async fn signup_page(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if req.is_authenticated() {
        return HttpResponse::Found()
            .insert_header((header::LOCATION, "/"))
            .finish();
    }
    render_page(
        &state,
        "pages/signup.html",
        PageContext::new(&state.app_name).to_value(),
    )
}

async fn request_password_reset_page(state: web::Data<AppState>) -> HttpResponse {
    render_page(
        &state,
        "pages/request_password_reset.html",
        PageContext::new(&state.app_name).to_value(),
    )
}

async fn reset_password_page(state: web::Data<AppState>) -> HttpResponse {
    render_page(
        &state,
        "pages/reset_password.html",
        PageContext::new(&state.app_name).to_value(),
    )
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
