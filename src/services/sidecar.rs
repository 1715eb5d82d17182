//! Optional `meta.json` files that sit next to a comic or chapter directory.
//!
//! Every sidecar follows the same chain: the directory name supplies the
//! defaults, the sidecar overrides whatever fields it sets, and a missing or
//! malformed sidecar is treated as empty. A broken sidecar is logged and
//! never reported to the client.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::fs;

use crate::models::comic::{ChapterTitle, ComicMeta};

pub const SIDECAR_FILE: &str = "meta.json";

/// A sidecar shape together with the way it is merged over its directory defaults.
pub trait Sidecar: DeserializeOwned + Default {
    type Resolved;

    fn resolve(self, slug: &str) -> Self::Resolved;
}

#[derive(Debug, Default, Deserialize)]
pub struct ComicSidecar {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sidecar for ComicSidecar {
    type Resolved = ComicMeta;

    fn resolve(mut self, slug: &str) -> ComicMeta {
        // The directory name is the key; a sidecar can't rename it.
        self.extra.remove("slug");
        ComicMeta {
            slug: slug.to_string(),
            title: or_default(self.title, slug),
            description: self.description.unwrap_or_default(),
            extra: self.extra,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChapterSidecar {
    #[serde(default)]
    pub title: Option<String>,
}

impl Sidecar for ChapterSidecar {
    type Resolved = ChapterTitle;

    fn resolve(self, slug: &str) -> ChapterTitle {
        ChapterTitle {
            title: or_default(self.title, slug),
        }
    }
}

/// Read `<dir>/meta.json` as `T`, falling back to `T::default()`.
pub async fn load_sidecar<T: Sidecar>(dir: &Path) -> T {
    let path = dir.join(SIDECAR_FILE);
    let raw = match fs::read(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            return T::default();
        }
    };

    match serde_json::from_slice(&raw) {
        Ok(sidecar) => sidecar,
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            T::default()
        }
    }
}

/// Load the sidecar in `dir` and merge it over the defaults derived from `slug`.
pub async fn load_resolved<T: Sidecar>(dir: &Path, slug: &str) -> T::Resolved {
    load_sidecar::<T>(dir).await.resolve(slug)
}

fn or_default(value: Option<String>, slug: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| slug.to_string())
}
