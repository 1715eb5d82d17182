//! Where the viewer gets its catalog and page lists from.
//!
//! The same controller runs against a live server ([`ApiSource`]), a static
//! deployment that only has `chapters.json` snapshots ([`SnapshotSource`]),
//! or the catalog resolver in-process ([`LocalSource`]).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::models::comic::{
    page_url, ChapterPages, ChapterSnapshot, ChapterSummary, ComicDetail, Page, SNAPSHOT_FILE,
};
use crate::models::error::FetchError;
use crate::services::catalog::Catalog;
use crate::services::sidecar::{ComicSidecar, Sidecar, SIDECAR_FILE};
use crate::viewer::state::{ComicCatalog, LoadedChapter};

#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_catalog(&self, comic: &str) -> Result<ComicCatalog, FetchError>;

    async fn fetch_chapter_pages(
        &self,
        comic: &str,
        chapter: &ChapterSummary,
    ) -> Result<LoadedChapter, FetchError>;
}

#[async_trait]
impl<S: DataSource + ?Sized> DataSource for Box<S> {
    async fn fetch_catalog(&self, comic: &str) -> Result<ComicCatalog, FetchError> {
        (**self).fetch_catalog(comic).await
    }

    async fn fetch_chapter_pages(
        &self,
        comic: &str,
        chapter: &ChapterSummary,
    ) -> Result<LoadedChapter, FetchError> {
        (**self).fetch_chapter_pages(comic, chapter).await
    }
}

/// Shared plumbing for the two HTTP-backed sources.
#[derive(Debug, Clone)]
struct HttpBase {
    client: Client,
    base: Url,
}

impl HttpBase {
    fn new(base: Url) -> Self {
        HttpBase {
            client: Client::new(),
            base,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidBase(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

/// Talks to the `/api` routes of a running server.
#[derive(Debug, Clone)]
pub struct ApiSource {
    http: HttpBase,
}

impl ApiSource {
    pub fn new(base: Url) -> Self {
        ApiSource {
            http: HttpBase::new(base),
        }
    }
}

#[async_trait]
impl DataSource for ApiSource {
    async fn fetch_catalog(&self, comic: &str) -> Result<ComicCatalog, FetchError> {
        let url = self.http.endpoint(&["api", "comics", comic])?;
        let detail: ComicDetail = self.http.get_json(url).await?;
        Ok(ComicCatalog {
            title: detail.meta.title,
            chapters: detail.chapters,
        })
    }

    async fn fetch_chapter_pages(
        &self,
        comic: &str,
        chapter: &ChapterSummary,
    ) -> Result<LoadedChapter, FetchError> {
        let url = self
            .http
            .endpoint(&["api", "comics", comic, "chapters", chapter.slug.as_str()])?;
        let pages: ChapterPages = self.http.get_json(url).await?;
        Ok(LoadedChapter {
            title: pages.meta.title,
            pages: pages.pages,
        })
    }
}

/// Reads `comics/<slug>/meta.json` and `comics/<slug>/chapters.json` from a
/// plain static file host.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    http: HttpBase,
}

impl SnapshotSource {
    pub fn new(base: Url) -> Self {
        SnapshotSource {
            http: HttpBase::new(base),
        }
    }

    async fn snapshot(&self, comic: &str) -> Result<Vec<ChapterSnapshot>, FetchError> {
        let url = self.http.endpoint(&["comics", comic, SNAPSHOT_FILE])?;
        self.http.get_json(url).await
    }
}

#[async_trait]
impl DataSource for SnapshotSource {
    async fn fetch_catalog(&self, comic: &str) -> Result<ComicCatalog, FetchError> {
        let meta_url = self.http.endpoint(&["comics", comic, SIDECAR_FILE])?;
        // The comic sidecar is optional on static hosts too.
        let sidecar = match self.http.get_json::<ComicSidecar>(meta_url).await {
            Ok(sidecar) => sidecar,
            Err(FetchError::Status(code)) if code == StatusCode::NOT_FOUND.as_u16() => {
                ComicSidecar::default()
            }
            Err(e) => return Err(e),
        };

        let chapters = self
            .snapshot(comic)
            .await?
            .into_iter()
            .map(|c| ChapterSummary {
                pages_count: c.pages.len(),
                slug: c.slug,
                title: c.title,
            })
            .collect();

        Ok(ComicCatalog {
            title: sidecar.resolve(comic).title,
            chapters,
        })
    }

    async fn fetch_chapter_pages(
        &self,
        comic: &str,
        chapter: &ChapterSummary,
    ) -> Result<LoadedChapter, FetchError> {
        let entry = self
            .snapshot(comic)
            .await?
            .into_iter()
            .find(|c| c.slug == chapter.slug)
            .ok_or_else(|| FetchError::MissingChapter(chapter.slug.clone()))?;

        let pages = entry
            .pages
            .into_iter()
            .map(|filename| Page {
                url: page_url(comic, &entry.slug, &filename),
                filename,
            })
            .collect();
        Ok(LoadedChapter {
            title: entry.title,
            pages,
        })
    }
}

/// Reads the comics root directly, without a server in between.
pub struct LocalSource {
    catalog: Catalog,
}

impl LocalSource {
    pub fn new(catalog: Catalog) -> Self {
        LocalSource { catalog }
    }
}

#[async_trait]
impl DataSource for LocalSource {
    async fn fetch_catalog(&self, comic: &str) -> Result<ComicCatalog, FetchError> {
        let detail = self.catalog.get_comic(comic).await?;
        Ok(ComicCatalog {
            title: detail.meta.title,
            chapters: detail.chapters,
        })
    }

    async fn fetch_chapter_pages(
        &self,
        comic: &str,
        chapter: &ChapterSummary,
    ) -> Result<LoadedChapter, FetchError> {
        let pages = self.catalog.get_chapter(comic, &chapter.slug).await?;
        Ok(LoadedChapter {
            title: pages.meta.title,
            pages: pages.pages,
        })
    }
}
