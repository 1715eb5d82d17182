//! Serves a directory of comics over HTTP and drives a chapter viewer over it.
//!
//! - [`services::catalog`] maps `comics/<slug>/chapters/<chapter>/<pages>` to JSON listings.
//! - [`routes`] exposes those listings under `/api` next to the static mounts.
//! - [`viewer`] is the headless reader: a pure state-transition function plus a
//!   driver that fetches from a pluggable [`viewer::source::DataSource`].

#[macro_use]
extern crate rocket;

pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;

use rocket::fairing::AdHoc;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};

use crate::config::AppConfig;
use crate::services::catalog::Catalog;
use crate::utils::cors::CORS;

// Static public files sit below everything else mounted at `/`.
const PUBLIC_RANK: isize = 11;

/// Assemble the server. Both served directories must already exist.
pub fn build_rocket(config: AppConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment().merge(("port", config.port));
    let catalog = Catalog::new(config.comics_dir.clone());
    let comics_files = FileServer::from(&config.comics_dir);
    let public_files = FileServer::from(&config.public_dir).rank(PUBLIC_RANK);
    let roots = format!(
        "Serving comics from {} and assets from {}",
        config.comics_dir.display(),
        config.public_dir.display()
    );

    rocket::custom(figment)
        .attach(CORS)
        .attach(AdHoc::on_liftoff("Catalog roots", move |_| {
            Box::pin(async move { log::info!("{}", roots) })
        }))
        .manage(catalog)
        .manage(config)
        .mount("/", routes![routes::assets::index, routes::comics::placeholder_cover])
        .mount(
            "/api",
            routes![
                routes::comics::list_comics,
                routes::comics::get_comic,
                routes::comics::get_chapter,
                routes::assets::custom_logo,
                routes::assets::patterns,
            ],
        )
        .mount("/comics", comics_files)
        .mount("/", public_files)
}
