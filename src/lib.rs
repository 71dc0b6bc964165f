#[macro_use]
extern crate rocket;

pub mod api;
pub mod bootstrap;
pub mod common;
pub mod config;
pub mod registry;
pub mod utils;

use crate::api::fairings::liftoff_fairing;
use crate::api::handlers::download::generate_download_routes;
use crate::api::handlers::home::generate_home_routes;
use crate::api::handlers::upload::generate_upload_routes;
use crate::config::ShareConfig;
use crate::registry::ShareRegistry;

/// Assemble the server around an explicitly constructed registry, so every instance
/// (and every test) owns its own share codes.
pub fn build_rocket(config: ShareConfig, registry: ShareRegistry) -> rocket::Rocket<rocket::Build> {
    rocket::custom(config.figment())
        .attach(liftoff_fairing())
        .manage(config)
        .manage(registry)
        .mount("/", generate_home_routes())
        .mount("/", generate_upload_routes())
        .mount("/", generate_download_routes())
}
