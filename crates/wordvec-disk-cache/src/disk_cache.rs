//! # Wordvec Disk Cache

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::WORDVEC_CACHE_CONFIG;

/// `base/context[0]/.../file`; an empty `file` names the context dir itself.
fn join_under<C, F>(
    base: &Path,
    context: &[C],
    file: F,
) -> PathBuf
where
    C: AsRef<Path>,
    F: AsRef<Path>,
{
    let mut path = base.to_path_buf();
    path.extend(context.iter().map(|c| c.as_ref()));
    let file = file.as_ref();
    if !file.as_os_str().is_empty() {
        path.push(file);
    }
    path
}

/// Options for [`WordvecDiskCache`].
#[derive(Clone, Default, Debug)]
pub struct WordvecDiskCacheOptions {
    /// Optional path to the cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Optional path to the data directory.
    pub data_dir: Option<PathBuf>,
}

impl WordvecDiskCacheOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(
        mut self,
        data_dir: Option<P>,
    ) -> Self {
        self.data_dir = data_dir.map(|p| p.as_ref().to_path_buf());
        self
    }
}

/// Resolved on-disk locations for embedding sources and parsed artifacts.
///
/// Raw `.txt` sources live under the data dir; the parsed binary
/// artifacts live under the cache dir. Neither dir is created until
/// something asks for it.
#[derive(Clone, Debug)]
pub struct WordvecDiskCache {
    cache_dir: PathBuf,
    data_dir: PathBuf,
}

impl WordvecDiskCache {
    /// Construct a new [`WordvecDiskCache`].
    pub fn new(options: WordvecDiskCacheOptions) -> anyhow::Result<Self> {
        let cache_dir = WORDVEC_CACHE_CONFIG
            .resolve_cache_dir(options.cache_dir)
            .context("failed to resolve cache directory")?;

        let data_dir = WORDVEC_CACHE_CONFIG
            .resolve_data_dir(options.data_dir)
            .context("failed to resolve data directory")?;

        Ok(Self {
            cache_dir,
            data_dir,
        })
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the cache path for `file` under the `context` dirs.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    pub fn cache_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        join_under(&self.cache_dir, context, file)
    }

    /// Get the data path for `file` under the `context` dirs.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    pub fn data_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        join_under(&self.data_dir, context, file)
    }

    /// Create (if needed) and return the cache dir for `context`.
    pub fn ensure_cache_dir<C: AsRef<Path>>(
        &self,
        context: &[C],
    ) -> anyhow::Result<PathBuf> {
        let dir = join_under::<C, &str>(&self.cache_dir, context, "");
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create cache dir: {}", dir.display()))?;
        Ok(dir)
    }

    /// Locate an existing source file under the data dir.
    ///
    /// ## Errors
    /// * if the file does not exist; nothing is downloaded.
    pub fn find_data_file<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> anyhow::Result<PathBuf>
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        let path = self.data_path(context, file);
        if !path.is_file() {
            anyhow::bail!("source file not found: {}", path.display());
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;
    use tempdir::TempDir;

    use super::*;
    use crate::{WORDVEC_CACHE_DIR, WORDVEC_DATA_DIR};

    fn explicit(dir: &TempDir) -> WordvecDiskCache {
        WordvecDiskCache::new(
            WordvecDiskCacheOptions::default()
                .with_cache_dir(Some(dir.path().join("cache")))
                .with_data_dir(Some(dir.path().join("data"))),
        )
        .unwrap()
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let orig_cache_dir = env::var(WORDVEC_CACHE_DIR);
        let orig_data_dir = env::var(WORDVEC_DATA_DIR);

        unsafe {
            env::set_var(WORDVEC_CACHE_DIR, "/tmp/wordvec/env_cache");
            env::set_var(WORDVEC_DATA_DIR, "/tmp/wordvec/env_data");
        }

        let cache = WordvecDiskCache::new(WordvecDiskCacheOptions::default()).unwrap();
        assert_eq!(cache.cache_dir(), Path::new("/tmp/wordvec/env_cache"));
        assert_eq!(cache.data_dir(), Path::new("/tmp/wordvec/env_data"));

        let cache = WordvecDiskCache::new(
            WordvecDiskCacheOptions::default().with_cache_dir(Some("/tmp/wordvec/user_cache")),
        )
        .unwrap();
        assert_eq!(cache.cache_dir(), Path::new("/tmp/wordvec/user_cache"));
        assert_eq!(cache.data_dir(), Path::new("/tmp/wordvec/env_data"));

        match orig_cache_dir {
            Ok(original) => unsafe { env::set_var(WORDVEC_CACHE_DIR, original) },
            Err(_) => unsafe { env::remove_var(WORDVEC_CACHE_DIR) },
        }
        match orig_data_dir {
            Ok(original) => unsafe { env::set_var(WORDVEC_DATA_DIR, original) },
            Err(_) => unsafe { env::remove_var(WORDVEC_DATA_DIR) },
        }
    }

    #[test]
    fn test_paths() {
        let dir = TempDir::new("wordvec_disk_cache").unwrap();
        let cache = explicit(&dir);

        assert_eq!(
            cache.cache_path(&["glove"], "a.txt.wvc"),
            dir.path().join("cache").join("glove").join("a.txt.wvc")
        );
        assert_eq!(
            cache.data_path(&["glove"], "a.txt"),
            dir.path().join("data").join("glove").join("a.txt")
        );
    }

    #[test]
    fn test_ensure_and_find() {
        let dir = TempDir::new("wordvec_disk_cache").unwrap();
        let cache = explicit(&dir);

        let created = cache.ensure_cache_dir(&["glove"]).unwrap();
        assert!(created.is_dir());

        assert!(cache.find_data_file(&["glove"], "missing.txt").is_err());

        fs::create_dir_all(dir.path().join("data").join("glove")).unwrap();
        fs::write(cache.data_path(&["glove"], "there.txt"), "a 1 2\n").unwrap();
        assert_eq!(
            cache.find_data_file(&["glove"], "there.txt").unwrap(),
            cache.data_path(&["glove"], "there.txt")
        );
    }
}
