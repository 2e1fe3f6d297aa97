use std::{
    ffi::OsString,
    path::{Component, Path},
};

use wordvec::{
    EmbeddingTable,
    pretrained::{PretrainedSource, find_source},
};

use crate::disk_cache::DiskCacheArgs;

/// Cache context for sources given by path.
const LOCAL_KEY: &str = "local";

/// A resolved `--source` value.
#[derive(Debug, PartialEq)]
pub enum SourceKind<'a> {
    /// A known pretrained alias.
    Pretrained(PretrainedSource),

    /// A text file path.
    Path(&'a Path),
}

/// The cache context of a path source: [`LOCAL_KEY`] then its absolute parent dir.
fn local_context(path: &Path) -> Vec<OsString> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let parent = parent
        .canonicalize()
        .unwrap_or_else(|_| parent.to_path_buf());

    let mut context = vec![OsString::from(LOCAL_KEY)];
    context.extend(parent.components().filter_map(|c| match c {
        Component::Normal(name) => Some(name.to_os_string()),
        _ => None,
    }));
    context
}

/// Source selector arg group.
#[derive(clap::Args, Debug)]
pub struct SourceSelectorArgs {
    /// Pretrained alias (see `wvec sources`) or path to an embedding text file.
    ///
    /// A path source is cached under `<cache_dir>/local/<its absolute parent dir>/`.
    #[arg(long, default_value = "glove.840B.300d")]
    source: String,
}

impl SourceSelectorArgs {
    /// Classify the source; aliases win over same-named paths.
    pub fn kind(&self) -> SourceKind<'_> {
        match find_source(&self.source) {
            Some(source) => SourceKind::Pretrained(source),
            None => SourceKind::Path(Path::new(&self.source)),
        }
    }

    /// Load the table, reading or writing its cache artifact.
    pub fn load_table(
        &self,
        disk_cache: &DiskCacheArgs,
    ) -> Result<EmbeddingTable, Box<dyn std::error::Error>> {
        let mut loader = disk_cache.init_loader()?;
        let table = match self.kind() {
            SourceKind::Pretrained(source) => source.load(&mut loader)?,
            SourceKind::Path(path) => {
                let cache_dir = loader.disk_cache().cache_path(&local_context(path), "");
                EmbeddingTable::load_with_options(
                    path,
                    disk_cache.table_options().with_cache_dir(Some(cache_dir)),
                )?
            }
        };
        log::debug!("{} words of {} dimensions", table.len(), table.dim());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::{ffi::OsStr, fs, path::PathBuf};

    use clap::Parser;
    use tempdir::TempDir;

    use super::*;

    #[derive(Parser, Debug)]
    struct LoadCli {
        #[command(flatten)]
        source: SourceSelectorArgs,

        #[command(flatten)]
        disk_cache: DiskCacheArgs,
    }

    #[test]
    fn test_kind() {
        let args = SourceSelectorArgs {
            source: "glove.6B.100d".to_string(),
        };
        assert_eq!(
            args.kind(),
            SourceKind::Pretrained(PretrainedSource::Glove6B100d)
        );

        let args = SourceSelectorArgs {
            source: "vectors/my.txt".to_string(),
        };
        assert_eq!(args.kind(), SourceKind::Path(Path::new("vectors/my.txt")));
    }

    #[test]
    fn test_local_context() {
        let dir = TempDir::new("wordvec_cli_context").unwrap();
        let root = dir.path().canonicalize().unwrap();

        let context = local_context(&dir.path().join("vectors.txt"));
        assert_eq!(context[0], OsString::from(LOCAL_KEY));
        assert_eq!(
            context[1..].iter().collect::<PathBuf>(),
            root.strip_prefix("/").unwrap_or(root.as_path())
        );
    }

    #[test]
    fn test_same_file_name_in_two_dirs() {
        let dir = TempDir::new("wordvec_cli_sources").unwrap();
        let cache_dir = dir.path().join("cache");
        let data_dir = dir.path().join("data");

        let mut tables = Vec::new();
        for (sub, word) in [("a", "apple"), ("b", "banana")] {
            let source = dir.path().join(sub).join("vectors.txt");
            fs::create_dir_all(source.parent().unwrap()).unwrap();
            fs::write(&source, format!("{word} 1.0 2.0\n")).unwrap();

            let cli = LoadCli::try_parse_from([
                OsStr::new("wvec"),
                OsStr::new("--source"),
                source.as_os_str(),
                OsStr::new("--cache-dir"),
                cache_dir.as_os_str(),
                OsStr::new("--data-dir"),
                data_dir.as_os_str(),
            ])
            .unwrap();
            assert_eq!(cli.source.kind(), SourceKind::Path(&source));
            tables.push(cli.source.load_table(&cli.disk_cache).unwrap());
        }

        assert!(tables[0].contains("apple"));
        assert!(!tables[0].contains("banana"));
        assert!(tables[1].contains("banana"));
        assert!(!tables[1].contains("apple"));

        let local = cache_dir.join(LOCAL_KEY);
        for sub in ["a", "b"] {
            let parent = dir.path().join(sub).canonicalize().unwrap();
            let artifact = local
                .join(parent.strip_prefix("/").unwrap_or(parent.as_path()))
                .join("vectors.txt.wvc");
            assert!(artifact.is_file(), "missing {}", artifact.display());
        }
    }
}
