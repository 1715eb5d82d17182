use std::fs;
use std::path::Path;

use rocket::http::{ContentType, Header, Method, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use comic_shelf::build_rocket;
use comic_shelf::config::AppConfig;

struct Site {
    _root: TempDir,
    client: Client,
}

fn put(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn site(populate: impl FnOnce(&Path, &Path)) -> Site {
    let root = TempDir::new().unwrap();
    let comics = root.path().join("comics");
    let public = root.path().join("public");
    fs::create_dir_all(&comics).unwrap();
    fs::create_dir_all(&public).unwrap();
    populate(&comics, &public);

    let config = AppConfig {
        comics_dir: comics,
        public_dir: public,
        default_comic: "dew".into(),
        ..AppConfig::default()
    };
    let client = Client::tracked(build_rocket(config)).expect("valid rocket instance");
    Site {
        _root: root,
        client,
    }
}

fn dew(comics: &Path, public: &Path) {
    put(&comics.join("dew/meta.json"), r#"{"title": "Dew", "description": "drops"}"#);
    put(&comics.join("dew/chapters/chapter-1/1.jpg"), "one");
    put(&comics.join("dew/chapters/chapter-1/3.jpg"), "three");
    put(&comics.join("dew/chapters/chapter-1/notes.txt"), "no");
    put(&comics.join("dew/chapters/chapter-2/meta.json"), r#"{"title": "Coming soon"}"#);
    put(&comics.join("dew/chapters/chapter-2/1.png"), "png");
    put(&comics.join("dew/chapters/chapter-10/1.png"), "png");
    put(&public.join("viewer.html"), "<html></html>");
    put(&public.join("assets/patterns/dots.svg"), "<svg/>");
}

fn body(site: &Site, uri: &str) -> (Status, Value) {
    let response = site.client.get(uri).dispatch();
    let status = response.status();
    let json = response.into_json::<Value>().unwrap_or(Value::Null);
    (status, json)
}

#[test]
fn empty_root_lists_nothing() {
    let site = site(|_, _| {});
    let (status, json) = body(&site, "/api/comics");
    assert_eq!(status, Status::Ok);
    assert_eq!(json, json!({"comics": []}));
}

#[test]
fn lists_comics_with_fallback_cover() {
    let site = site(dew);
    let (_, json) = body(&site, "/api/comics");
    assert_eq!(
        json,
        json!({"comics": [{
            "slug": "dew",
            "title": "Dew",
            "description": "drops",
            "cover": "/comics/dew/chapters/chapter-1/1.jpg"
        }]})
    );
}

#[test]
fn comic_detail_orders_chapters() {
    let site = site(dew);
    let (status, json) = body(&site, "/api/comics/dew");
    assert_eq!(status, Status::Ok);
    assert_eq!(json["meta"], json!({"slug": "dew", "title": "Dew", "description": "drops"}));
    assert_eq!(
        json["chapters"],
        json!([
            {"slug": "chapter-1", "title": "chapter-1", "pagesCount": 2},
            {"slug": "chapter-2", "title": "Coming soon", "pagesCount": 1},
            {"slug": "chapter-10", "title": "chapter-10", "pagesCount": 1},
        ])
    );
}

#[test]
fn unknown_comic_is_404_json() {
    let site = site(dew);
    let (status, json) = body(&site, "/api/comics/nope");
    assert_eq!(status, Status::NotFound);
    assert_eq!(json, json!({"error": "Comic not found"}));
}

#[test]
fn chapter_pages_and_static_files_agree() {
    let site = site(dew);
    let (status, json) = body(&site, "/api/comics/dew/chapters/chapter-1");
    assert_eq!(status, Status::Ok);
    assert_eq!(
        json,
        json!({
            "slug": "dew",
            "chapterSlug": "chapter-1",
            "meta": {"title": "chapter-1"},
            "pages": [
                {"filename": "1.jpg", "url": "/comics/dew/chapters/chapter-1/1.jpg"},
                {"filename": "3.jpg", "url": "/comics/dew/chapters/chapter-1/3.jpg"},
            ]
        })
    );

    for page in json["pages"].as_array().unwrap() {
        let response = site.client.get(page["url"].as_str().unwrap()).dispatch();
        assert_eq!(response.status(), Status::Ok);
    }
}

#[test]
fn unknown_chapter_is_404_json() {
    let site = site(dew);
    let (status, json) = body(&site, "/api/comics/dew/chapters/chapter-9");
    assert_eq!(status, Status::NotFound);
    assert_eq!(json, json!({"error": "Chapter not found"}));
}

#[test]
fn asset_listings() {
    let site = site(dew);
    let (_, patterns) = body(&site, "/api/patterns");
    assert_eq!(
        patterns,
        json!({"files": [{"filename": "dots.svg", "url": "/assets/patterns/dots.svg"}]})
    );
    let (status, logos) = body(&site, "/api/custom-logo");
    assert_eq!(status, Status::Ok);
    assert_eq!(logos, json!({"files": []}));
}

#[test]
fn root_redirects_to_default_comic() {
    let site = site(dew);
    let response = site.client.get("/").dispatch();
    assert_eq!(response.status(), Status::Found);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("/viewer.html?comic=dew")
    );
}

#[test]
fn serves_public_files_and_placeholder() {
    let site = site(dew);
    let response = site.client.get("/viewer.html").dispatch();
    assert_eq!(response.status(), Status::Ok);

    let response = site.client.get("/icons/placeholder-cover.png").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::SVG));
    assert!(response.into_string().unwrap().contains("Placeholder Cover"));
}

#[test]
fn responses_carry_cors_headers() {
    let site = site(dew);
    let response = site.client.get("/api/comics").dispatch();
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );

    let preflight = site
        .client
        .req(Method::Options, "/api/comics")
        .header(Header::new("Origin", "http://example.org"))
        .dispatch();
    assert_eq!(preflight.status(), Status::NoContent);
}

#[test]
fn listed_urls_survive_reserved_characters() {
    let site = site(|comics, _| {
        put(&comics.join("shelf/chapters/part one/page 1.png"), "1");
        put(&comics.join("shelf/chapters/part one/a#b.png"), "2");
        put(&comics.join("shelf/chapters/part one/50%.png"), "3");
    });

    let (_, list) = body(&site, "/api/comics");
    let cover = list["comics"][0]["cover"].as_str().unwrap().to_string();
    assert!(cover.starts_with("/comics/shelf/chapters/part%20one/"));
    assert_eq!(site.client.get(cover).dispatch().status(), Status::Ok);

    let (status, json) = body(&site, "/api/comics/shelf/chapters/part%20one");
    assert_eq!(status, Status::Ok);
    let pages = json["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 3);
    for page in pages {
        let url = page["url"].as_str().unwrap();
        assert!(!url.contains(' ') && !url.contains('#'), "{}", url);
        let response = site.client.get(url.to_string()).dispatch();
        assert_eq!(response.status(), Status::Ok, "{}", url);
    }
}
