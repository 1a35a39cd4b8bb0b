// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::calendar::build_event;
use super::models::{VisitCreateRequest, VisitUpdateRequest};
use super::repository::VisitRepository;
use crate::auth::require_auth;
use crate::error::ApiError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/places/{place_id}/visits", web::post().to(create_visit))
        .route("/places/{place_id}/visits", web::get().to(list_visits))
        .route("/visits/{id}", web::get().to(get_visit))
        .route("/visits/{id}", web::put().to(update_visit))
        .route("/visits/{id}", web::delete().to(delete_visit))
        .route("/visits/{id}/calendar_event", web::get().to(calendar_event))
        .route("/visits/{id}/image", web::put().to(set_image));
}

async fn create_visit(
    req: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<VisitCreateRequest>,
    visits: web::Data<VisitRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let payload = payload.into_inner();
    payload.validate()?;
    let visit = visits
        .create(&token, user.id, path.into_inner(), payload)
        .await?;
    Ok(HttpResponse::Created().json(visit))
}

async fn list_visits(
    req: HttpRequest,
    path: web::Path<Uuid>,
    visits: web::Data<VisitRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let rows = visits
        .list_for_place(&token, user.id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(rows))
}

async fn get_visit(
    req: HttpRequest,
    path: web::Path<Uuid>,
    visits: web::Data<VisitRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let visit = visits.get(&token, user.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(visit))
}

async fn update_visit(
    req: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<VisitUpdateRequest>,
    visits: web::Data<VisitRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let payload = payload.into_inner();
    payload.validate()?;
    let visit = visits
        .update(&token, user.id, path.into_inner(), payload)
        .await?;
    Ok(HttpResponse::Ok().json(visit))
}

async fn delete_visit(
    req: HttpRequest,
    path: web::Path<Uuid>,
    visits: web::Data<VisitRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    visits.delete(&token, user.id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// A downloadable single-event calendar for the visit.
async fn calendar_event(
    req: HttpRequest,
    path: web::Path<Uuid>,
    visits: web::Data<VisitRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let visit = visits.get(&token, user.id, path.into_inner()).await?;
    let place = visits
        .require_place(&token, user.id, visit.place_id)
        .await?;

    let ics = build_event(&visit, &place.name, Utc::now());
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/calendar; charset=utf-8"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"visit-{}.ics\"", visit.id),
        ))
        .body(ics))
}

/// Raw image body upload. The content type of the request becomes the stored
/// object's content type.
async fn set_image(
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Bytes,
    visits: web::Data<VisitRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    if body.is_empty() {
        return Err(ApiError::validation("Image body is empty"));
    }
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let visit = visits
        .set_image(&token, user.id, path.into_inner(), body.to_vec(), &content_type)
        .await?;
    let image_url = visits.image_url(&visit);
    Ok(HttpResponse::Ok().json(json!({
        "image_path": visit.image_path,
        "image_url": image_url,
    })))
}
