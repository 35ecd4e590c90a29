//! # Index Persistence Module
//!
//! Saves and loads the vector index as a single JSON file holding the three
//! parallel sequences. Writes go to a sibling temporary file that is renamed
//! into place, so a failed write never corrupts an existing store. An
//! existing file is only replaced when the caller explicitly opts in.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

use super::error::IndexError;
use super::store::VectorIndex;

/// Save the index to a single store file.
///
/// Returns `true` when the file was written. When a file already exists at
/// `path` and `overwrite` is false, nothing is touched and `false` is
/// returned.
#[instrument(skip(index), fields(entries = index.len()))]
pub async fn save_index(
    index: &VectorIndex,
    path: &Path,
    overwrite: bool,
) -> Result<bool, IndexError> {
    if fs::try_exists(path).await? && !overwrite {
        debug!("{} exists and overwrite was not requested", path.display());
        return Ok(false);
    }

    let serialized = serde_json::to_vec(index)?;
    let tmp = temp_path(path);
    fs::write(&tmp, &serialized).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    info!("Saved {} entries to {}", index.len(), path.display());
    Ok(true)
}

/// Load an index from a store file.
///
/// Fails with [`IndexError::NotFound`] when the file does not exist and with
/// [`IndexError::Corrupt`] when the content does not deserialize into an
/// index whose parallel-array invariant holds.
#[instrument]
pub async fn load_index(path: &Path) -> Result<VectorIndex, IndexError> {
    if !fs::try_exists(path).await? {
        return Err(IndexError::NotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).await?;
    let index: VectorIndex =
        serde_json::from_slice(&bytes).map_err(|e| IndexError::Corrupt(e.to_string()))?;
    index.validate().map_err(|e| IndexError::Corrupt(e.to_string()))?;

    info!("Loaded {} entries from {}", index.len(), path.display());
    Ok(index)
}

/// Sibling path the new store content is written to before the rename.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("index"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::ChunkMetadata;

    fn meta(position: usize) -> ChunkMetadata {
        ChunkMetadata {
            source_url: "https://example.com/article".to_string(),
            title: Some("Example".to_string()),
            position,
        }
    }

    fn sample_index() -> VectorIndex {
        VectorIndex::build(
            vec![vec![0.0, 1.0], vec![2.0, 3.0]],
            vec!["first chunk".to_string(), "second chunk".to_string()],
            vec![meta(0), meta(1)],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let index = sample_index();

        assert!(save_index(&index, &path, false).await.unwrap());
        let loaded = load_index(&path).await.unwrap();

        assert_eq!(loaded.vectors(), index.vectors());
        assert_eq!(loaded.texts(), index.texts());
        assert_eq!(loaded.metadata(), index.metadata());
        assert_eq!(loaded.dimensions(), index.dimensions());
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        save_index(&sample_index(), &path, false).await.unwrap();

        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn test_existing_file_survives_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        save_index(&sample_index(), &path, false).await.unwrap();
        let original_bytes = std::fs::read(&path).unwrap();

        let replacement = VectorIndex::build(
            vec![vec![9.0, 9.0]],
            vec!["replacement".to_string()],
            vec![meta(0)],
        )
        .unwrap();

        let written = save_index(&replacement, &path, false).await.unwrap();
        assert!(!written);
        assert_eq!(std::fs::read(&path).unwrap(), original_bytes);

        let written = save_index(&replacement, &path, true).await.unwrap();
        assert!(written);
        assert_ne!(std::fs::read(&path).unwrap(), original_bytes);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        assert!(matches!(
            load_index(&path).await,
            Err(IndexError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"definitely not an index").unwrap();

        assert!(matches!(
            load_index(&path).await,
            Err(IndexError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_misaligned_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        // One vector but no texts or metadata.
        std::fs::write(
            &path,
            br#"{"dimensions":2,"vectors":[[0.0,0.0]],"texts":[],"metadata":[]}"#,
        )
        .unwrap();

        assert!(matches!(
            load_index(&path).await,
            Err(IndexError::Corrupt(_))
        ));
    }
}
