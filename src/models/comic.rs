use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cover served when a comic has neither a cover file nor any page images.
pub const PLACEHOLDER_COVER: &str = "/icons/placeholder-cover.png";

/// Per-comic snapshot file for deployments without a live server.
pub const SNAPSHOT_FILE: &str = "chapters.json";

/// One entry of `GET /api/comics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub cover: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComicList {
    pub comics: Vec<ComicSummary>,
}

/// Comic metadata after the sidecar has been merged over the defaults.
///
/// Fields the sidecar carries beyond `title` and `description` are passed
/// through to clients unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicMeta {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub slug: String,
    pub title: String,
    #[serde(rename = "pagesCount")]
    pub pages_count: usize,
}

/// Body of `GET /api/comics/<slug>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComicDetail {
    pub meta: ComicMeta,
    pub chapters: Vec<ChapterSummary>,
}

/// A file exposed to clients by name and by the URL it is served under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    pub filename: String,
    pub url: String,
}

pub type Page = FileLink;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterTitle {
    pub title: String,
}

/// Body of `GET /api/comics/<slug>/chapters/<chapterSlug>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterPages {
    pub slug: String,
    #[serde(rename = "chapterSlug")]
    pub chapter_slug: String,
    pub meta: ChapterTitle,
    pub pages: Vec<Page>,
}

/// Body of the custom-logo and pattern listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetList {
    pub files: Vec<FileLink>,
}

/// One record of a `chapters.json` snapshot, used where no live server backs the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSnapshot {
    pub slug: String,
    pub title: String,
    pub pages: Vec<String>,
}

/// URL a page file is served under by the static comics mount.
pub fn page_url(slug: &str, chapter_slug: &str, filename: &str) -> String {
    comics_url(&[slug, "chapters", chapter_slug, filename])
}

/// URL of a file directly inside a comic directory, such as its cover.
pub fn comic_file_url(slug: &str, filename: &str) -> String {
    comics_url(&[slug, filename])
}

// Each segment is percent-encoded so names like `page 1.png` or `a#b.png` survive.
fn comics_url(segments: &[&str]) -> String {
    segments.iter().fold(String::from("/comics"), |mut url, segment| {
        url.push('/');
        url.push_str(&urlencoding::encode(segment));
        url
    })
}
