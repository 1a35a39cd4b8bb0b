// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Forward geocoding and coordinate-to-timezone lookup against public
//! services. Both are best-effort conveniences; neither holds user data.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::auth::require_auth;
use crate::config::GeocodingConfig;
use crate::error::ApiError;

const SEARCH_RESULT_LIMIT: u8 = 5;

#[derive(Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    config: GeocodingConfig,
}

/// Nominatim-style search result. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct SearchRow {
    display_name: String,
    lat: String,
    lon: String,
}

#[derive(Debug, Serialize)]
pub struct GeocodeResult {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct TimezoneResponse {
    #[serde(rename = "timeZone")]
    time_zone: Option<String>,
}

impl GeocodeClient {
    pub fn new(config: GeocodingConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    /// Free-text place search. Rows whose coordinates fail to parse are
    /// dropped rather than failing the whole response.
    pub async fn search(&self, query: &str) -> Result<Vec<GeocodeResult>, ApiError> {
        let url = format!(
            "{}?q={}&format=json&limit={}",
            self.config.search_url,
            urlencoding::encode(query),
            SEARCH_RESULT_LIMIT
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::Unavailable(format!("geocoding request failed: {}", err)))?;
        if !response.status().is_success() {
            return Err(ApiError::Unavailable(format!(
                "geocoding service returned status {}",
                response.status()
            )));
        }
        let rows: Vec<SearchRow> = response
            .json()
            .await
            .map_err(|err| ApiError::internal(format!("geocoding response unreadable: {}", err)))?;

        let results = rows
            .into_iter()
            .filter_map(|row| {
                match (row.lat.parse::<f64>(), row.lon.parse::<f64>()) {
                    (Ok(latitude), Ok(longitude)) => Some(GeocodeResult {
                        display_name: row.display_name,
                        latitude,
                        longitude,
                    }),
                    _ => {
                        log::warn!("Dropping geocode row with unparseable coordinates: {}", row.display_name);
                        None
                    }
                }
            })
            .collect();
        Ok(results)
    }

    /// IANA zone name for a coordinate pair, `None` when the service has no
    /// answer for the location.
    pub async fn timezone_for(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>, ApiError> {
        let url = format!(
            "{}?latitude={}&longitude={}",
            self.config.timezone_url, latitude, longitude
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::Unavailable(format!("timezone request failed: {}", err)))?;
        if !response.status().is_success() {
            return Err(ApiError::Unavailable(format!(
                "timezone service returned status {}",
                response.status()
            )));
        }
        let body: TimezoneResponse = response
            .json()
            .await
            .map_err(|err| ApiError::internal(format!("timezone response unreadable: {}", err)))?;
        Ok(body.time_zone)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/geocode", web::get().to(geocode_search));
}

#[derive(Debug, Deserialize)]
struct GeocodeQuery {
    q: String,
}

async fn geocode_search(
    req: HttpRequest,
    query: web::Query<GeocodeQuery>,
    geocode: web::Data<GeocodeClient>,
) -> Result<HttpResponse, ApiError> {
    require_auth(&req)?;
    let text = query.q.trim();
    if text.is_empty() {
        return Err(ApiError::validation("Search query is required"));
    }
    let results = geocode.search(text).await?;
    Ok(HttpResponse::Ok().json(results))
}
