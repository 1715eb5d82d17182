//! Writes `chapters.json` snapshots so a viewer can run from plain static hosting.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::models::comic::SNAPSHOT_FILE;
use crate::models::error::CatalogError;
use crate::services::catalog::Catalog;

/// Where one comic's snapshot went.
#[derive(Debug)]
pub struct SnapshotReport {
    pub slug: String,
    pub chapters: usize,
    pub written: Vec<PathBuf>,
}

/// Write `<comics>/<slug>/chapters.json`, plus a copy under
/// `<mirror>/comics/<slug>/` when the mirror directory exists.
///
/// A failed mirror write is logged and does not fail the snapshot.
pub async fn write_snapshot(
    catalog: &Catalog,
    slug: &str,
    mirror: Option<&Path>,
) -> Result<SnapshotReport, CatalogError> {
    let snapshots = catalog.chapter_snapshots(slug).await?;
    let json = serde_json::to_string_pretty(&snapshots)?;

    let primary = catalog.comics_dir().join(slug).join(SNAPSHOT_FILE);
    fs::write(&primary, &json).await?;
    let mut written = vec![primary];

    if let Some(mirror) = mirror {
        if fs::metadata(mirror).await.map(|m| m.is_dir()).unwrap_or(false) {
            let target_dir = mirror.join("comics").join(slug);
            let target = target_dir.join(SNAPSHOT_FILE);
            let result = async {
                fs::create_dir_all(&target_dir).await?;
                fs::write(&target, &json).await
            }
            .await;
            match result {
                Ok(()) => written.push(target),
                Err(e) => log::warn!("Could not write {}: {}", target.display(), e),
            }
        } else {
            log::debug!("Mirror {} does not exist, skipping", mirror.display());
        }
    }

    Ok(SnapshotReport {
        slug: slug.to_string(),
        chapters: snapshots.len(),
        written,
    })
}
