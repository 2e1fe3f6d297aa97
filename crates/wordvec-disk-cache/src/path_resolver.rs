//! # Directory Resolution
//!
//! Static defaults for locating the cache and data directories.

use std::{
    env,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

/// Which of the two managed directories is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// Parsed table artifacts; safe to delete.
    Cache,

    /// Raw embedding source files.
    Data,
}

/// Static configuration for directory resolution.
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// Cache directory environment overrides, highest priority first.
    pub cache_env_vars: &'static [&'static str],

    /// Data directory environment overrides, highest priority first.
    pub data_env_vars: &'static [&'static str],
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.qualifier, self.organization, self.application)
    }

    /// The environment overrides consulted for `kind`.
    pub fn env_vars(
        &self,
        kind: DirKind,
    ) -> &'static [&'static str] {
        match kind {
            DirKind::Cache => self.cache_env_vars,
            DirKind::Data => self.data_env_vars,
        }
    }

    /// Resolve a directory of the given kind.
    ///
    /// Resolution Order:
    /// 1. `path`, if present.
    /// 2. ``env[$VAR]`` for each of [`Self::env_vars`]; in order.
    /// 3. the platform [`ProjectDirs`] location, if any.
    /// 4. `None`
    pub fn resolve<P: AsRef<Path>>(
        &self,
        kind: DirKind,
        path: Option<P>,
    ) -> Option<PathBuf> {
        if let Some(path) = path {
            return Some(path.as_ref().to_path_buf());
        }

        if let Some(path) = self
            .env_vars(kind)
            .iter()
            .find_map(|var| env::var_os(var))
        {
            return Some(PathBuf::from(path));
        }

        self.project_dirs().map(|pds| match kind {
            DirKind::Cache => pds.cache_dir().to_path_buf(),
            DirKind::Data => pds.data_dir().to_path_buf(),
        })
    }

    /// Resolve the cache directory; see [`Self::resolve`].
    ///
    /// On Linux the platform default is `$XDG_CACHE_HOME/<app>`
    /// or `$HOME/.cache/<app>`.
    pub fn resolve_cache_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        self.resolve(DirKind::Cache, path)
    }

    /// Resolve the data directory; see [`Self::resolve`].
    ///
    /// On Linux the platform default is `$XDG_DATA_HOME/<app>`
    /// or `$HOME/.local/share/<app>`.
    pub fn resolve_data_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        self.resolve(DirKind::Data, path)
    }
}
