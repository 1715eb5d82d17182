//! Maps the comics directory tree onto catalog listings.
//!
//! ```text
//! comics/
//! └── <slug>/
//!     ├── meta.json              # optional: title, description, extra fields
//!     ├── cover.{png,jpg,jpeg,svg}
//!     └── chapters/
//!         └── <chapterSlug>/
//!             ├── meta.json      # optional: title
//!             └── <page images>
//! ```
//!
//! Nothing is cached: every call re-reads the disk, so a listing always
//! reflects the tree as it is at request time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::models::comic::{
    comic_file_url, page_url, AssetList, ChapterPages, ChapterSnapshot, ChapterSummary,
    ComicDetail, ComicList, ComicSummary, FileLink, Page, PLACEHOLDER_COVER,
};
use crate::models::error::CatalogError;
use crate::services::sidecar::{load_resolved, ChapterSidecar, ComicSidecar};
use crate::utils::natural::{is_image, natural_sort};

const CHAPTERS_DIR: &str = "chapters";
const COVER_FILES: [&str; 4] = ["cover.png", "cover.jpg", "cover.jpeg", "cover.svg"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum EntryKind {
    Directory,
    Image,
}

pub struct Catalog {
    comics_dir: PathBuf,
}

impl Catalog {
    pub fn new(comics_dir: impl Into<PathBuf>) -> Self {
        Catalog {
            comics_dir: comics_dir.into(),
        }
    }

    pub fn comics_dir(&self) -> &Path {
        &self.comics_dir
    }

    /// Slugs of every comic directory, in natural order.
    pub async fn comic_slugs(&self) -> Vec<String> {
        list_entries(&self.comics_dir, EntryKind::Directory).await
    }

    /// Every comic under the root. A missing root is an empty catalog.
    pub async fn list_comics(&self) -> ComicList {
        let mut comics = Vec::new();
        for slug in self.comic_slugs().await {
            let comic_dir = self.comics_dir.join(&slug);
            let meta = load_resolved::<ComicSidecar>(&comic_dir, &slug).await;
            let cover = self.resolve_cover(&slug).await;
            comics.push(ComicSummary {
                slug,
                title: meta.title,
                description: meta.description,
                cover,
            });
        }
        log::debug!("Listed {} comics under {}", comics.len(), self.comics_dir.display());
        ComicList { comics }
    }

    pub async fn get_comic(&self, slug: &str) -> Result<ComicDetail, CatalogError> {
        let comic_dir = self.comic_dir(slug).await?;
        let meta = load_resolved::<ComicSidecar>(&comic_dir, slug).await;

        let chapters_dir = comic_dir.join(CHAPTERS_DIR);
        let mut chapters = Vec::new();
        for chapter_slug in list_entries(&chapters_dir, EntryKind::Directory).await {
            let chapter_dir = chapters_dir.join(&chapter_slug);
            let title = load_resolved::<ChapterSidecar>(&chapter_dir, &chapter_slug).await;
            let pages_count = list_entries(&chapter_dir, EntryKind::Image).await.len();
            chapters.push(ChapterSummary {
                slug: chapter_slug,
                title: title.title,
                pages_count,
            });
        }

        Ok(ComicDetail { meta, chapters })
    }

    pub async fn get_chapter(
        &self,
        slug: &str,
        chapter_slug: &str,
    ) -> Result<ChapterPages, CatalogError> {
        let chapter_dir = self.chapter_dir(slug, chapter_slug).await?;
        let meta = load_resolved::<ChapterSidecar>(&chapter_dir, chapter_slug).await;
        let pages = list_entries(&chapter_dir, EntryKind::Image)
            .await
            .into_iter()
            .map(|filename| Page {
                url: page_url(slug, chapter_slug, &filename),
                filename,
            })
            .collect();

        Ok(ChapterPages {
            slug: slug.to_string(),
            chapter_slug: chapter_slug.to_string(),
            meta,
            pages,
        })
    }

    /// The `chapters.json` records for one comic.
    pub async fn chapter_snapshots(&self, slug: &str) -> Result<Vec<ChapterSnapshot>, CatalogError> {
        let chapters_dir = self.comic_dir(slug).await?.join(CHAPTERS_DIR);
        let mut snapshots = Vec::new();
        for chapter_slug in list_entries(&chapters_dir, EntryKind::Directory).await {
            let chapter_dir = chapters_dir.join(&chapter_slug);
            let title = load_resolved::<ChapterSidecar>(&chapter_dir, &chapter_slug).await;
            let pages = list_entries(&chapter_dir, EntryKind::Image).await;
            snapshots.push(ChapterSnapshot {
                slug: chapter_slug,
                title: title.title,
                pages,
            });
        }
        Ok(snapshots)
    }

    async fn comic_dir(&self, slug: &str) -> Result<PathBuf, CatalogError> {
        if !is_valid_slug(slug) {
            return Err(CatalogError::ComicNotFound);
        }
        let dir = self.comics_dir.join(slug);
        if is_dir(&dir).await {
            Ok(dir)
        } else {
            Err(CatalogError::ComicNotFound)
        }
    }

    async fn chapter_dir(&self, slug: &str, chapter_slug: &str) -> Result<PathBuf, CatalogError> {
        if !is_valid_slug(slug) || !is_valid_slug(chapter_slug) {
            return Err(CatalogError::ChapterNotFound);
        }
        let dir = self
            .comics_dir
            .join(slug)
            .join(CHAPTERS_DIR)
            .join(chapter_slug);
        if is_dir(&dir).await {
            Ok(dir)
        } else {
            Err(CatalogError::ChapterNotFound)
        }
    }

    async fn resolve_cover(&self, slug: &str) -> String {
        let comic_dir = self.comics_dir.join(slug);
        for file in COVER_FILES {
            if is_file(&comic_dir.join(file)).await {
                return comic_file_url(slug, file);
            }
        }

        let chapters_dir = comic_dir.join(CHAPTERS_DIR);
        let chapters = list_entries(&chapters_dir, EntryKind::Directory).await;
        if let Some(first_chapter) = chapters.first() {
            let pages = list_entries(&chapters_dir.join(first_chapter), EntryKind::Image).await;
            if let Some(first_page) = pages.first() {
                return page_url(slug, first_chapter, first_page);
            }
        }

        PLACEHOLDER_COVER.to_string()
    }
}

/// Image files in an asset folder, in byte order, linked under `url_prefix`.
pub async fn list_assets(dir: &Path, url_prefix: &str) -> AssetList {
    let mut names = scan_dir(dir, EntryKind::Image).await;
    names.sort();
    let files = names
        .into_iter()
        .map(|filename| FileLink {
            url: format!("{}/{}", url_prefix, urlencoding::encode(&filename)),
            filename,
        })
        .collect();
    AssetList { files }
}

/// A slug must name exactly one directory entry.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}

async fn list_entries(dir: &Path, kind: EntryKind) -> Vec<String> {
    let mut names = scan_dir(dir, kind).await;
    natural_sort(&mut names);
    names
}

// Unreadable directories list as empty; only unexpected failures are logged.
async fn scan_dir(dir: &Path, kind: EntryKind) -> Vec<String> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("Could not read {}: {}", dir.display(), e);
            }
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                log::warn!("Error while reading {}: {}", dir.display(), e);
                break;
            }
        };
        let Ok(name) = entry.file_name().into_string() else {
            log::debug!("Skipping non UTF-8 entry in {}", dir.display());
            continue;
        };
        let matches = match kind {
            EntryKind::Directory => is_dir(&entry.path()).await,
            EntryKind::Image => is_image(&name) && is_file(&entry.path()).await,
        };
        if matches {
            names.push(name);
        }
    }
    names
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false)
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}
