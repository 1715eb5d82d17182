use rocket::http::ContentType;
use rocket::serde::json::Json;
use rocket::State;

use crate::models::comic::{ChapterPages, ComicDetail, ComicList};
use crate::models::error::CatalogError;
use crate::services::catalog::Catalog;

const PLACEHOLDER_SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg' width='512' height='512'>\
<rect width='100%' height='100%' fill='#f3f4f6'/>\
<text x='50%' y='50%' fill='#9ca3af' font-size='28' font-family='Arial' \
dominant-baseline='middle' text-anchor='middle'>Placeholder Cover</text></svg>";

#[get("/comics")]
pub async fn list_comics(catalog: &State<Catalog>) -> Json<ComicList> {
    Json(catalog.list_comics().await)
}

#[get("/comics/<slug>")]
pub async fn get_comic(
    catalog: &State<Catalog>,
    slug: &str,
) -> Result<Json<ComicDetail>, CatalogError> {
    log::info!("Requested comic: {}", slug);
    catalog.get_comic(slug).await.map(Json)
}

#[get("/comics/<slug>/chapters/<chapter_slug>")]
pub async fn get_chapter(
    catalog: &State<Catalog>,
    slug: &str,
    chapter_slug: &str,
) -> Result<Json<ChapterPages>, CatalogError> {
    log::info!("Requested chapter: {}/{}", slug, chapter_slug);
    catalog.get_chapter(slug, chapter_slug).await.map(Json)
}

#[get("/icons/placeholder-cover.png")]
pub fn placeholder_cover() -> (ContentType, &'static str) {
    (ContentType::SVG, PLACEHOLDER_SVG)
}
