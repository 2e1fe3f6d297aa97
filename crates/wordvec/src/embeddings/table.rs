//! # Embedding Table

use std::{
    borrow::Cow,
    io::BufRead,
    path::{Path, PathBuf},
};

use crate::{
    embeddings::{
        cache::{cache_path_for, load_cached_table, save_cached_table},
        text_io::{ParsedRows, load_embedding_text_path, read_embedding_text},
    },
    errors::{WVResult, WordvecError, check_dim},
    types::{WVHashMap, hash_map_with_capacity},
};

/// How to synthesize a vector for a token a table does not contain.
#[derive(Clone, Copy, Debug, Default)]
pub enum UnkInit {
    /// All zeros.
    #[default]
    Zeros,

    /// Every component set to the given value.
    Constant(f32),

    /// A caller function of the dimension.
    ///
    /// The returned vector must have exactly `dim` components.
    Custom(fn(usize) -> Vec<f32>),
}

impl UnkInit {
    /// Build a vector of length `dim`.
    ///
    /// ## Errors
    /// * [`WordvecError::DimensionMismatch`] if a `Custom` init returns the wrong length.
    pub fn init(
        &self,
        dim: usize,
    ) -> WVResult<Vec<f32>> {
        match self {
            UnkInit::Zeros => Ok(vec![0.0; dim]),
            UnkInit::Constant(v) => Ok(vec![*v; dim]),
            UnkInit::Custom(f) => {
                let v = f(dim);
                check_dim(dim, v.len())?;
                Ok(v)
            }
        }
    }
}

/// Options for [`EmbeddingTable::load_with_options`].
#[derive(Clone, Debug)]
pub struct EmbeddingTableOptions {
    /// Directory for the parsed cache artifact; `None` disables caching.
    pub cache_dir: Option<PathBuf>,

    /// Write the artifact after a fresh parse.
    pub write_cache: bool,

    /// The table's default initializer for unknown tokens.
    pub unk_init: UnkInit,
}

impl Default for EmbeddingTableOptions {
    fn default() -> Self {
        Self {
            cache_dir: None,
            write_cache: true,
            unk_init: UnkInit::Zeros,
        }
    }
}

impl EmbeddingTableOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Enable or disable writing the cache artifact.
    pub fn with_write_cache(
        mut self,
        write_cache: bool,
    ) -> Self {
        self.write_cache = write_cache;
        self
    }

    /// Set the unknown-token initializer.
    pub fn with_unk_init(
        mut self,
        unk_init: UnkInit,
    ) -> Self {
        self.unk_init = unk_init;
        self
    }
}

/// A dense, immutable token -> vector table.
///
/// Row `i` of the vector matrix is the embedding of `tokens()[i]`;
/// every row has exactly `dim()` components.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    tokens: Vec<String>,
    index_of: WVHashMap<String, usize>,
    vectors: Vec<f32>,
    dim: usize,
    unk_init: UnkInit,
}

impl PartialEq for EmbeddingTable {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.dim == other.dim
            && self.tokens == other.tokens
            && self.index_of == other.index_of
            && self.vectors == other.vectors
    }
}

impl EmbeddingTable {
    /// Load a table from `source`, using (and populating) a cache under `cache_dir`.
    ///
    /// If `<cache_dir>/<source file name>.wvc` exists it is loaded directly
    /// and `source` is not read; the source need not even exist.
    ///
    /// ## Errors
    /// * [`WordvecError::Load`] if neither the cache nor the source exists.
    /// * [`WordvecError::DimensionInconsistency`] if source rows disagree in width.
    pub fn load<S: AsRef<Path>, C: AsRef<Path>>(
        source: S,
        cache_dir: C,
    ) -> WVResult<Self> {
        Self::load_with_options(
            source,
            EmbeddingTableOptions::default().with_cache_dir(Some(cache_dir)),
        )
    }

    /// Load a table from `source` with explicit options.
    pub fn load_with_options<S: AsRef<Path>>(
        source: S,
        options: EmbeddingTableOptions,
    ) -> WVResult<Self> {
        let source = source.as_ref();

        let cache_path = match &options.cache_dir {
            Some(dir) => Some(cache_path_for(source, dir)?),
            None => None,
        };

        if let Some(path) = &cache_path
            && path.is_file()
        {
            log::info!("Loading vectors from {}", path.display());
            let mut table = Self::from_cache_path(path)?;
            table.unk_init = options.unk_init;
            return Ok(table);
        }

        if !source.is_file() {
            return Err(WordvecError::Load(format!(
                "no vectors found at {}",
                source.display()
            )));
        }

        let table =
            Self::from_parsed_rows(load_embedding_text_path(source)?)?.with_unk_init(options.unk_init);

        if let Some(path) = &cache_path
            && options.write_cache
        {
            log::info!("Saving vectors to {}", path.display());
            table.save_cache(path)?;
        }

        Ok(table)
    }

    /// Parse a table from an embedding text stream; no caching.
    pub fn read_text<R: BufRead>(reader: R) -> WVResult<Self> {
        Self::from_parsed_rows(read_embedding_text(reader, "<reader>")?)
    }

    /// Build a table from `(token, vector)` rows.
    ///
    /// ## Errors
    /// * [`WordvecError::EmptyInput`] if there are no rows or the first row is empty.
    /// * [`WordvecError::DimensionInconsistency`] if a row's width differs from the first.
    pub fn from_rows<I, S>(rows: I) -> WVResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut parsed = ParsedRows::default();
        for (token, vector) in rows {
            let token = token.into();
            if parsed.tokens.is_empty() {
                parsed.dim = vector.len();
            } else if vector.len() != parsed.dim {
                return Err(WordvecError::DimensionInconsistency {
                    token,
                    found: vector.len(),
                    expected: parsed.dim,
                });
            }
            parsed.vectors.extend(vector);
            parsed.tokens.push(token);
        }
        if parsed.tokens.is_empty() || parsed.dim == 0 {
            return Err(WordvecError::EmptyInput(
                "an embedding table needs at least one non-empty row".to_string(),
            ));
        }
        Self::from_parsed_rows(parsed)
    }

    /// Load a table from a cache artifact path.
    pub fn from_cache_path<P: AsRef<Path>>(path: P) -> WVResult<Self> {
        let cached = load_cached_table(path.as_ref())?;
        Ok(Self {
            tokens: cached.tokens,
            index_of: cached.index_of,
            vectors: cached.vectors,
            dim: cached.dim,
            unk_init: UnkInit::default(),
        })
    }

    /// Write this table's cache artifact to `path`.
    pub fn save_cache<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> WVResult<()> {
        save_cached_table(
            path.as_ref(),
            &self.tokens,
            &self.index_of,
            &self.vectors,
            self.dim,
        )
    }

    fn from_parsed_rows(rows: ParsedRows) -> WVResult<Self> {
        let ParsedRows {
            tokens,
            vectors,
            dim,
        } = rows;
        debug_assert_eq!(tokens.len() * dim, vectors.len());

        // Later duplicates win, matching a plain map build.
        let mut index_of = hash_map_with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            index_of.insert(token.clone(), idx);
        }
        if index_of.len() != tokens.len() {
            log::warn!(
                "{} duplicate tokens; lookups resolve to the last occurrence",
                tokens.len() - index_of.len()
            );
        }

        Ok(Self {
            tokens,
            index_of,
            vectors,
            dim,
            unk_init: UnkInit::default(),
        })
    }

    /// Replace the default unknown-token initializer.
    pub fn with_unk_init(
        mut self,
        unk_init: UnkInit,
    ) -> Self {
        self.unk_init = unk_init;
        self
    }

    /// The row width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Row tokens, in row order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The token -> row map.
    pub fn index_map(&self) -> &WVHashMap<String, usize> {
        &self.index_of
    }

    /// The row-major vector data.
    pub fn vectors(&self) -> &[f32] {
        &self.vectors
    }

    /// The table's unknown-token initializer.
    pub fn unk_init(&self) -> UnkInit {
        self.unk_init
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f32]> {
        self.vectors.chunks_exact(self.dim)
    }

    /// Row `idx`, if in range.
    pub fn row(
        &self,
        idx: usize,
    ) -> Option<&[f32]> {
        let start = idx.checked_mul(self.dim)?;
        self.vectors.get(start..start + self.dim)
    }

    /// The row index of `token`.
    pub fn index_of(
        &self,
        token: &str,
    ) -> Option<usize> {
        self.index_of.get(token).copied()
    }

    /// Check if `token` has a row.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.index_of.contains_key(token)
    }

    /// The vector of `token`, if present.
    pub fn get(
        &self,
        token: &str,
    ) -> Option<&[f32]> {
        self.index_of(token).and_then(|idx| self.row(idx))
    }

    /// The vector of `token`; unknown tokens get the table's [`UnkInit`].
    ///
    /// The table is never modified.
    pub fn vector_of(
        &self,
        token: &str,
    ) -> WVResult<Cow<'_, [f32]>> {
        self.vector_of_with(token, self.unk_init)
    }

    /// The vector of `token`; unknown tokens get `unk_init`.
    pub fn vector_of_with(
        &self,
        token: &str,
        unk_init: UnkInit,
    ) -> WVResult<Cow<'_, [f32]>> {
        match self.get(token) {
            Some(row) => Ok(Cow::Borrowed(row)),
            None => Ok(Cow::Owned(unk_init.init(self.dim)?)),
        }
    }
}
