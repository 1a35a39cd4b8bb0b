// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{LevelFilter, info};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use wanderlist::app_state::AppState;
use wanderlist::auth::AuthMiddlewareFactory;
use wanderlist::config::{Config, ValidatedConfig};
use wanderlist::geocode::GeocodeClient;
use wanderlist::places::PlaceRepository;
use wanderlist::provider::{ProviderAuth, ProviderCore, ProviderDb, ProviderStorage};
use wanderlist::tags::TagRepository;
use wanderlist::visits::VisitRepository;
use wanderlist::{api, pages};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let runtime_root = match parse_args() {
        Ok(root) => root,
        Err(error) => {
            eprintln!("Invalid command line arguments: {}", error);
            eprintln!("Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    let config_path = runtime_root.join("config.yaml");
    if !config_path.exists() {
        if let Err(error) = std::fs::write(&config_path, Config::starter_yaml()) {
            eprintln!(
                "Failed to write starter config {}: {}",
                config_path.display(),
                error
            );
            return 1;
        }
        eprintln!(
            "Wrote starter config to {}; fill in the provider credentials and start again.",
            config_path.display()
        );
        return 1;
    }

    let config = match Config::load_and_validate(&runtime_root) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Configuration error: {}", error);
            return 1;
        }
    };

    match System::new().block_on(run_server(config)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Server failed to start: {}", error);
            1
        }
    }
}

fn parse_args() -> Result<PathBuf, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<PathBuf, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut runtime_root = PathBuf::from(".");

    while let Some(arg) = args.next() {
        if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = PathBuf::from(value);
        } else {
            return Err(format!("Unknown argument: {}", arg));
        }
    }

    make_runtime_root_absolute(runtime_root)
}

fn make_runtime_root_absolute(root: PathBuf) -> Result<PathBuf, String> {
    if root.is_absolute() {
        return Ok(root);
    }
    let cwd = std::env::current_dir()
        .map_err(|err| format!("Cannot resolve current directory: {}", err))?;
    Ok(cwd.join(root))
}

fn init_logging(config: &ValidatedConfig) {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

async fn run_server(config: ValidatedConfig) -> std::io::Result<()> {
    init_logging(&config);

    let core = ProviderCore::new(&config.provider)
        .map_err(|error| std::io::Error::other(error.to_string()))?;
    let provider_auth = ProviderAuth::new(core.clone());
    let db = ProviderDb::new(core.clone());
    let storage = ProviderStorage::new(core, config.provider.storage_bucket.clone());
    let geocode = GeocodeClient::new(config.geocoding.clone())
        .map_err(|error| std::io::Error::other(error.to_string()))?;

    let tag_repository = TagRepository::new(db.clone());
    let place_repository = PlaceRepository::new(
        db.clone(),
        tag_repository.clone(),
        storage.clone(),
        geocode.clone(),
    );
    let visit_repository = VisitRepository::new(db, storage);

    let app_state = Arc::new(AppState::new(&config.app.name));

    let host = config.server.host.clone();
    let port = config.server.port;
    let workers = config.server.workers;
    info!("Starting {} on {}:{}", config.app.name, host, port);

    let config_data = web::Data::new(config);
    let app_state_data = web::Data::from(app_state);
    let provider_auth_data = web::Data::new(provider_auth);
    let geocode_data = web::Data::new(geocode);
    let tags_data = web::Data::new(tag_repository);
    let places_data = web::Data::new(place_repository);
    let visits_data = web::Data::new(visit_repository);

    HttpServer::new(move || {
        App::new()
            .app_data(config_data.clone())
            .app_data(app_state_data.clone())
            .app_data(provider_auth_data.clone())
            .app_data(geocode_data.clone())
            .app_data(tags_data.clone())
            .app_data(places_data.clone())
            .app_data(visits_data.clone())
            .wrap(Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(AuthMiddlewareFactory)
            .configure(api::configure)
            .configure(pages::configure)
    })
    .workers(workers)
    .bind((host.as_str(), port))?
    .run()
    .await
}
