// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, test, web};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use wanderlist::api;
use wanderlist::app_state::AppState;
use wanderlist::auth::AuthMiddlewareFactory;
use wanderlist::config::{Config, ValidatedConfig};
use wanderlist::geocode::GeocodeClient;
use wanderlist::pages;
use wanderlist::places::PlaceRepository;
use wanderlist::provider::{ProviderAuth, ProviderCore, ProviderDb, ProviderStorage};
use wanderlist::tags::TagRepository;
use wanderlist::visits::VisitRepository;

pub const COOKIE_NAME: &str = "wanderlist_auth";
pub const STUB_TIMEZONE: &str = "America/Bogota";

/// In-memory stand-in for the hosted provider: rows API, auth API, object
/// storage, and the two geocoding endpoints, just enough for the app's
/// clients to talk to over real HTTP.
#[derive(Default)]
pub struct StubState {
    /// table name -> rows
    pub tables: HashMap<String, Vec<Value>>,
    /// email -> (user id, password)
    pub credentials: HashMap<String, (Uuid, String)>,
    /// access token -> (user id, email)
    pub sessions: HashMap<String, (Uuid, String)>,
    /// object path -> bytes
    pub objects: HashMap<String, Vec<u8>>,
    /// when set, the timezone endpoint answers 503
    pub timezone_down: bool,
}

pub type SharedStub = Arc<Mutex<StubState>>;

enum FilterOp {
    Eq(String),
    IsNull,
}

fn parse_filters(query: &str) -> Vec<(String, FilterOp)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, raw) = pair.split_once('=')?;
            if key == "select" {
                return None;
            }
            let value = urlencoding::decode(raw).ok()?.into_owned();
            if value == "is.null" {
                Some((key.to_string(), FilterOp::IsNull))
            } else {
                value
                    .strip_prefix("eq.")
                    .map(|v| (key.to_string(), FilterOp::Eq(v.to_string())))
            }
        })
        .collect()
}

fn value_matches(field: Option<&Value>, expected: &str) -> bool {
    match field {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == expected,
    }
}

fn row_matches(row: &Value, filters: &[(String, FilterOp)]) -> bool {
    filters.iter().all(|(column, op)| match op {
        FilterOp::Eq(expected) => value_matches(row.get(column), expected),
        FilterOp::IsNull => matches!(row.get(column), Some(Value::Null) | None),
    })
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    header.strip_prefix("Bearer ").map(|t| t.to_string())
}

async fn rest_get(
    req: HttpRequest,
    path: web::Path<String>,
    stub: web::Data<SharedStub>,
) -> HttpResponse {
    let filters = parse_filters(req.query_string());
    let state = stub.lock().unwrap();
    let rows: Vec<Value> = state
        .tables
        .get(path.as_str())
        .map(|rows| {
            rows.iter()
                .filter(|row| row_matches(row, &filters))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    HttpResponse::Ok().json(rows)
}

async fn rest_post(
    path: web::Path<String>,
    body: web::Json<Value>,
    stub: web::Data<SharedStub>,
) -> HttpResponse {
    let table = path.into_inner();
    let row = body.into_inner();
    let mut state = stub.lock().unwrap();

    if table == "tags" {
        let owner = row.get("owner_id").cloned().unwrap_or(Value::Null);
        let name = row.get("name").cloned().unwrap_or(Value::Null);
        let duplicate = state
            .tables
            .get("tags")
            .map(|rows| {
                rows.iter().any(|existing| {
                    existing.get("owner_id") == Some(&owner) && existing.get("name") == Some(&name)
                })
            })
            .unwrap_or(false);
        if duplicate {
            return HttpResponse::Conflict().body(
                "duplicate key value violates unique constraint \"tags_owner_id_name_key\"",
            );
        }
    }

    state.tables.entry(table).or_default().push(row.clone());
    HttpResponse::Created().json(vec![row])
}

async fn rest_patch(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Value>,
    stub: web::Data<SharedStub>,
) -> HttpResponse {
    let filters = parse_filters(req.query_string());
    let changes = match body.into_inner() {
        Value::Object(map) => map,
        _ => return HttpResponse::BadRequest().body("patch body must be an object"),
    };

    let mut state = stub.lock().unwrap();
    let mut updated = Vec::new();
    if let Some(rows) = state.tables.get_mut(path.as_str()) {
        for row in rows.iter_mut() {
            if row_matches(row, &filters)
                && let Some(object) = row.as_object_mut()
            {
                for (key, value) in &changes {
                    object.insert(key.clone(), value.clone());
                }
                updated.push(Value::Object(object.clone()));
            }
        }
    }
    HttpResponse::Ok().json(updated)
}

async fn rest_delete(
    req: HttpRequest,
    path: web::Path<String>,
    stub: web::Data<SharedStub>,
) -> HttpResponse {
    let filters = parse_filters(req.query_string());
    let mut state = stub.lock().unwrap();
    if let Some(rows) = state.tables.get_mut(path.as_str()) {
        rows.retain(|row| !row_matches(row, &filters));
    }
    HttpResponse::NoContent().finish()
}

fn new_session(state: &mut StubState, id: Uuid, email: &str) -> (String, Value) {
    let token = format!("tok-{}", Uuid::new_v4());
    state.sessions.insert(token.clone(), (id, email.to_string()));
    let session = json!({
        "access_token": token,
        "user": { "id": id, "email": email }
    });
    (token, session)
}

async fn auth_signup(body: web::Json<Value>, stub: web::Data<SharedStub>) -> HttpResponse {
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut state = stub.lock().unwrap();
    if state.credentials.contains_key(&email) {
        return HttpResponse::UnprocessableEntity().body("User already registered");
    }
    let id = Uuid::new_v4();
    state.credentials.insert(email.clone(), (id, password));
    let (_token, session) = new_session(&mut state, id, &email);
    HttpResponse::Ok().json(session)
}

async fn auth_token(body: web::Json<Value>, stub: web::Data<SharedStub>) -> HttpResponse {
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let password = body.get("password").and_then(Value::as_str).unwrap_or_default();

    let mut state = stub.lock().unwrap();
    match state.credentials.get(&email) {
        Some((id, stored)) if stored == password => {
            let id = *id;
            let (_token, session) = new_session(&mut state, id, &email);
            HttpResponse::Ok().json(session)
        }
        _ => HttpResponse::BadRequest().json(json!({
            "error_description": "Invalid login credentials"
        })),
    }
}

async fn auth_get_user(req: HttpRequest, stub: web::Data<SharedStub>) -> HttpResponse {
    let state = stub.lock().unwrap();
    match bearer_token(&req).and_then(|token| state.sessions.get(&token).cloned()) {
        Some((id, email)) => HttpResponse::Ok().json(json!({ "id": id, "email": email })),
        None => HttpResponse::Unauthorized().body("invalid token"),
    }
}

async fn auth_logout(req: HttpRequest, stub: web::Data<SharedStub>) -> HttpResponse {
    let mut state = stub.lock().unwrap();
    if let Some(token) = bearer_token(&req) {
        state.sessions.remove(&token);
    }
    HttpResponse::NoContent().finish()
}

async fn auth_recover(_body: web::Json<Value>) -> HttpResponse {
    HttpResponse::Ok().json(json!({}))
}

async fn auth_update_user(
    req: HttpRequest,
    body: web::Json<Value>,
    stub: web::Data<SharedStub>,
) -> HttpResponse {
    let mut state = stub.lock().unwrap();
    let Some((id, email)) = bearer_token(&req).and_then(|token| state.sessions.get(&token).cloned())
    else {
        return HttpResponse::Unauthorized().body("invalid token");
    };
    if let Some(password) = body.get("password").and_then(Value::as_str) {
        state
            .credentials
            .insert(email.clone(), (id, password.to_string()));
    }
    HttpResponse::Ok().json(json!({ "id": id, "email": email }))
}

async fn storage_upload(
    path: web::Path<(String, String)>,
    body: web::Bytes,
    stub: web::Data<SharedStub>,
) -> HttpResponse {
    let (_bucket, object_path) = path.into_inner();
    let mut state = stub.lock().unwrap();
    state.objects.insert(object_path, body.to_vec());
    HttpResponse::Ok().json(json!({}))
}

async fn storage_delete(
    path: web::Path<(String, String)>,
    stub: web::Data<SharedStub>,
) -> HttpResponse {
    let (_bucket, object_path) = path.into_inner();
    let mut state = stub.lock().unwrap();
    state.objects.remove(&object_path);
    HttpResponse::Ok().json(json!({}))
}

async fn geo_search() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        { "display_name": "Cafe X, Bogota, Colombia", "lat": "4.6000", "lon": "-74.0800" },
        { "display_name": "Cafe X, Quito, Ecuador", "lat": "-0.1800", "lon": "bogus" }
    ]))
}

async fn geo_timezone(stub: web::Data<SharedStub>) -> HttpResponse {
    let state = stub.lock().unwrap();
    if state.timezone_down {
        return HttpResponse::ServiceUnavailable().finish();
    }
    HttpResponse::Ok().json(json!({ "timeZone": STUB_TIMEZONE }))
}

fn start_stub(stub: SharedStub) -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let port = listener.local_addr().expect("stub addr").port();

    let server = actix_web::HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(stub.clone()))
            .route("/rest/v1/{table}", web::get().to(rest_get))
            .route("/rest/v1/{table}", web::post().to(rest_post))
            .route("/rest/v1/{table}", web::patch().to(rest_patch))
            .route("/rest/v1/{table}", web::delete().to(rest_delete))
            .route("/auth/v1/signup", web::post().to(auth_signup))
            .route("/auth/v1/token", web::post().to(auth_token))
            .route("/auth/v1/user", web::get().to(auth_get_user))
            .route("/auth/v1/user", web::put().to(auth_update_user))
            .route("/auth/v1/logout", web::post().to(auth_logout))
            .route("/auth/v1/recover", web::post().to(auth_recover))
            .route(
                "/storage/v1/object/{bucket}/{path:.*}",
                web::post().to(storage_upload),
            )
            .route(
                "/storage/v1/object/{bucket}/{path:.*}",
                web::delete().to(storage_delete),
            )
            .route("/geo/search", web::get().to(geo_search))
            .route("/geo/timezone", web::get().to(geo_timezone))
    })
    .workers(1)
    .listen(listener)
    .expect("listen stub")
    .run();

    actix_web::rt::spawn(server);
    port
}

fn build_config(port: u16) -> ValidatedConfig {
    let base = format!("http://127.0.0.1:{}", port);
    let yaml = format!(
        concat!(
            "server:\n",
            "  host: 127.0.0.1\n",
            "  port: 0\n",
            "  workers: 1\n",
            "provider:\n",
            "  url: {base}\n",
            "  anon_key: test-anon-key\n",
            "  service_role_key: test-service-key\n",
            "  storage_bucket: visit-images\n",
            "geocoding:\n",
            "  search_url: {base}/geo/search\n",
            "  timezone_url: {base}/geo/timezone\n",
        ),
        base = base
    );
    let config: Config = serde_yaml::from_str(&yaml).expect("parse test config");
    config.validate().expect("validate test config")
}

#[derive(Clone)]
pub struct AppBundle {
    pub config: Arc<ValidatedConfig>,
    pub app_state: Arc<AppState>,
    pub provider_auth: ProviderAuth,
    pub geocode: GeocodeClient,
    pub tags: TagRepository,
    pub places: PlaceRepository,
    pub visits: VisitRepository,
}

pub struct TestHarness {
    pub stub: SharedStub,
    pub config: Arc<ValidatedConfig>,
    bundle: AppBundle,
}

impl TestHarness {
    pub async fn new() -> Self {
        let stub: SharedStub = Arc::new(Mutex::new(StubState::default()));
        let port = start_stub(stub.clone());

        let config = Arc::new(build_config(port));
        let core = ProviderCore::new(&config.provider).expect("provider core");
        let provider_auth = ProviderAuth::new(core.clone());
        let db = ProviderDb::new(core.clone());
        let storage = ProviderStorage::new(core, config.provider.storage_bucket.clone());
        let geocode = GeocodeClient::new(config.geocoding.clone()).expect("geocode client");

        let tags = TagRepository::new(db.clone());
        let places = PlaceRepository::new(db.clone(), tags.clone(), storage.clone(), geocode.clone());
        let visits = VisitRepository::new(db, storage);
        let app_state = Arc::new(AppState::new("Wanderlist"));

        let bundle = AppBundle {
            config: config.clone(),
            app_state,
            provider_auth,
            geocode,
            tags,
            places,
            visits,
        };

        Self {
            stub,
            config,
            bundle,
        }
    }

    pub fn app_bundle(&self) -> AppBundle {
        self.bundle.clone()
    }

    /// Flip the timezone endpoint into failure mode.
    pub fn take_timezone_down(&self) {
        self.stub.lock().unwrap().timezone_down = true;
    }

    pub fn stored_object_paths(&self) -> Vec<String> {
        let state = self.stub.lock().unwrap();
        let mut paths: Vec<String> = state.objects.keys().cloned().collect();
        paths.sort();
        paths
    }
}

pub fn build_test_app(
    bundle: AppBundle,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(bundle.config))
        .app_data(web::Data::from(bundle.app_state))
        .app_data(web::Data::new(bundle.provider_auth))
        .app_data(web::Data::new(bundle.geocode))
        .app_data(web::Data::new(bundle.tags))
        .app_data(web::Data::new(bundle.places))
        .app_data(web::Data::new(bundle.visits))
        .wrap(AuthMiddlewareFactory)
        .configure(api::configure)
        .configure(pages::configure)
}

/// Pull the session cookie out of a login/signup response.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == COOKIE_NAME)
        .expect("session cookie")
        .into_owned()
}

/// Register a fresh account and return its session cookie.
pub async fn signup<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({ "email": email, "password": "password-123" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    session_cookie(&resp)
}

/// Create a place through the API and return the composed response body.
pub async fn create_place<S, B>(app: &S, cookie: &Cookie<'static>, payload: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/places/")
        .cookie(cookie.clone())
        .set_json(payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("place json")
}

/// Read a JSON body out of a response.
pub async fn read_json<B>(resp: ServiceResponse<B>) -> Value
where
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("json body")
}
