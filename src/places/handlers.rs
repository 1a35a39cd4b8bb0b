// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use super::models::{PlaceCreateRequest, PlaceUpdateRequest};
use super::repository::PlaceRepository;
use crate::auth::require_auth;
use crate::error::ApiError;

// Flat routes: a `/places` scope would also claim the nested
// `/places/{place_id}/visits` paths registered elsewhere.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/places/", web::post().to(create_place))
        .route("/places/", web::get().to(list_places))
        .route("/places/{id}", web::get().to(get_place))
        .route("/places/{id}", web::put().to(update_place))
        .route("/places/{id}", web::delete().to(delete_place));
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    include_deleted: bool,
}

async fn create_place(
    req: HttpRequest,
    payload: web::Json<PlaceCreateRequest>,
    places: web::Data<PlaceRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let payload = payload.into_inner();
    payload.validate()?;
    let place = places.create(&token, user.id, payload).await?;
    Ok(HttpResponse::Created().json(place))
}

async fn list_places(
    req: HttpRequest,
    query: web::Query<ListQuery>,
    places: web::Data<PlaceRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let rows = places.list(&token, user.id, query.include_deleted).await?;
    Ok(HttpResponse::Ok().json(rows))
}

async fn get_place(
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ListQuery>,
    places: web::Data<PlaceRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let place = places
        .get(&token, user.id, path.into_inner(), query.include_deleted)
        .await?;
    Ok(HttpResponse::Ok().json(place))
}

async fn update_place(
    req: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<PlaceUpdateRequest>,
    places: web::Data<PlaceRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    let payload = payload.into_inner();
    payload.validate()?;
    let place = places
        .update(&token, user.id, path.into_inner(), payload)
        .await?;
    Ok(HttpResponse::Ok().json(place))
}

async fn delete_place(
    req: HttpRequest,
    path: web::Path<Uuid>,
    places: web::Data<PlaceRepository>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = require_auth(&req)?;
    places.delete(&token, user.id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
