//! # Embedding Table Cache Artifacts
//!
//! A parsed [`EmbeddingTable`](super::EmbeddingTable) is persisted as a
//! single bincode record at `<cache_dir>/<source file name>.wvc`.
//! Reloading skips the text parse entirely.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{WVResult, WordvecError},
    types::WVHashMap,
};

/// Suffix appended to the source file name to name its cache artifact.
pub const CACHE_SUFFIX: &str = ".wvc";

/// Bumped whenever the record layout changes.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Borrowed view of a table, for writing.
#[derive(Serialize)]
struct CachedTableRef<'a> {
    format_version: u32,
    tokens: &'a [String],
    index_of: &'a WVHashMap<String, usize>,
    vectors: &'a [f32],
    dim: usize,
}

/// The decoded cache record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CachedTable {
    format_version: u32,

    /// Row tokens.
    pub tokens: Vec<String>,

    /// Token to row index.
    pub index_of: WVHashMap<String, usize>,

    /// Row-major vector data.
    pub vectors: Vec<f32>,

    /// Row width.
    pub dim: usize,
}

impl CachedTable {
    /// Structural checks only; vector contents are trusted.
    fn validate(
        self,
        path: &Path,
    ) -> WVResult<Self> {
        let bad = |msg: String| {
            Err(WordvecError::Load(format!(
                "invalid cache artifact {}: {msg}",
                path.display()
            )))
        };

        if self.format_version != CACHE_FORMAT_VERSION {
            return bad(format!(
                "format version {} (expected {CACHE_FORMAT_VERSION})",
                self.format_version
            ));
        }
        if self.dim == 0 {
            return bad("zero dimension".to_string());
        }
        if self.tokens.len().checked_mul(self.dim) != Some(self.vectors.len()) {
            return bad(format!(
                "{} tokens of dimension {} but {} components",
                self.tokens.len(),
                self.dim,
                self.vectors.len()
            ));
        }
        if let Some((token, &idx)) = self
            .index_of
            .iter()
            .find(|&(_, &idx)| idx >= self.tokens.len())
        {
            return bad(format!("token {token:?} indexes missing row {idx}"));
        }
        Ok(self)
    }
}

/// The cache artifact path for `source` under `cache_dir`.
///
/// ## Errors
/// * [`WordvecError::Load`] if `source` has no file name.
pub fn cache_path_for<S: AsRef<Path>, C: AsRef<Path>>(
    source: S,
    cache_dir: C,
) -> WVResult<PathBuf> {
    let source = source.as_ref();
    let name = source.file_name().ok_or_else(|| {
        WordvecError::Load(format!("source path has no file name: {}", source.display()))
    })?;

    // Keep the source extension: `a.txt` -> `a.txt.wvc`.
    let mut name = name.to_os_string();
    name.push(CACHE_SUFFIX);
    Ok(cache_dir.as_ref().join(name))
}

/// Write a cache artifact; creates the parent dir if needed.
///
/// Writes to a sibling temp file first, so a reader never sees a
/// half-written artifact.
pub fn save_cached_table(
    path: &Path,
    tokens: &[String],
    index_of: &WVHashMap<String, usize>,
    vectors: &[f32],
    dim: usize,
) -> WVResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("wvc.tmp");
    let written = write_record(
        &tmp,
        &CachedTableRef {
            format_version: CACHE_FORMAT_VERSION,
            tokens,
            index_of,
            vectors,
            dim,
        },
    )
    .and_then(|()| fs::rename(&tmp, path).map_err(WordvecError::from));

    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn write_record(
    tmp: &Path,
    record: &CachedTableRef<'_>,
) -> WVResult<()> {
    let mut writer = BufWriter::new(File::create(tmp)?);
    bincode::serialize_into(&mut writer, record)?;
    writer.flush()?;
    Ok(())
}

/// Read and structurally validate a cache artifact.
pub fn load_cached_table(path: &Path) -> WVResult<CachedTable> {
    let reader = BufReader::new(File::open(path)?);
    let table: CachedTable = bincode::deserialize_from(reader)?;
    table.validate(path)
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    fn sample() -> (Vec<String>, WVHashMap<String, usize>, Vec<f32>) {
        let tokens = vec!["cat".to_string(), "dog".to_string()];
        let index_of = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        (tokens, index_of, vec![1.0, 0.0, 0.0, 1.0])
    }

    #[test]
    fn test_cache_path_for() {
        assert_eq!(
            cache_path_for("/data/glove.6B.50d.txt", "/cache").unwrap(),
            PathBuf::from("/cache/glove.6B.50d.txt.wvc")
        );
        assert!(cache_path_for("/", "/cache").is_err());
    }

    #[test]
    fn test_save_load() {
        let dir = TempDir::new("wordvec_cache").unwrap();
        let path = dir.path().join("nested").join("t.txt.wvc");
        let (tokens, index_of, vectors) = sample();

        save_cached_table(&path, &tokens, &index_of, &vectors, 2).unwrap();
        assert!(!path.with_extension("wvc.tmp").exists());

        let loaded = load_cached_table(&path).unwrap();
        assert_eq!(loaded.tokens, tokens);
        assert_eq!(loaded.index_of, index_of);
        assert_eq!(loaded.vectors, vectors);
        assert_eq!(loaded.dim, 2);
    }

    #[test]
    fn test_rejects_inconsistent_shape() {
        let dir = TempDir::new("wordvec_cache").unwrap();
        let path = dir.path().join("t.txt.wvc");
        let (tokens, index_of, _) = sample();

        save_cached_table(&path, &tokens, &index_of, &[1.0, 2.0, 3.0], 2).unwrap();
        assert!(matches!(
            load_cached_table(&path),
            Err(WordvecError::Load(_))
        ));
    }

    #[test]
    fn test_rejects_overflowing_shape() {
        let dir = TempDir::new("wordvec_cache").unwrap();
        let path = dir.path().join("t.txt.wvc");
        let (tokens, index_of, _) = sample();

        save_cached_table(&path, &tokens, &index_of, &[], usize::MAX / 2 + 1).unwrap();
        assert!(matches!(
            load_cached_table(&path),
            Err(WordvecError::Load(_))
        ));
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        let dir = TempDir::new("wordvec_cache").unwrap();
        // A directory in the way makes the final rename fail.
        let path = dir.path().join("t.txt.wvc");
        fs::create_dir_all(path.join("occupied")).unwrap();
        let (tokens, index_of, vectors) = sample();

        assert!(save_cached_table(&path, &tokens, &index_of, &vectors, 2).is_err());
        assert!(!path.with_extension("wvc.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_rejects_garbage() {
        let dir = TempDir::new("wordvec_cache").unwrap();
        let path = dir.path().join("t.txt.wvc");
        fs::write(&path, b"not a cache").unwrap();
        assert!(load_cached_table(&path).is_err());
    }
}
