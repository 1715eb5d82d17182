use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;

use crate::config::AppConfig;
use crate::models::comic::AssetList;
use crate::services::catalog::list_assets;

/// Root opens the viewer on the configured default comic.
#[get("/")]
pub fn index(config: &State<AppConfig>) -> Redirect {
    Redirect::found(format!(
        "/viewer.html?comic={}",
        urlencoding::encode(&config.default_comic)
    ))
}

#[get("/custom-logo")]
pub async fn custom_logo(config: &State<AppConfig>) -> Json<AssetList> {
    Json(list_assets(&config.custom_logo_dir(), "/assets/custom-logo").await)
}

#[get("/patterns")]
pub async fn patterns(config: &State<AppConfig>) -> Json<AssetList> {
    Json(list_assets(&config.patterns_dir(), "/assets/patterns").await)
}
