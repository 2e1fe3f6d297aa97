//! # Vocabulary Vectors
//!
//! Attach a [`VectorMatrix`] to a [`Vocabulary`], one row per vocabulary index.

use std::{borrow::Cow, str::FromStr};

use crate::{
    embeddings::{EmbeddingTable, UnkInit},
    errors::{WVResult, WordvecError, check_dim},
    pretrained::{PretrainedSource, SourceLoader},
    types::WVHashMap,
    vocab::{VectorMatrix, Vocabulary},
};

/// A source of vectors for [`Vocabulary::load_vectors`].
#[derive(Debug, Clone, Copy)]
pub enum VectorSource<'a> {
    /// An already loaded table.
    Table(&'a EmbeddingTable),

    /// A pretrained alias, such as `glove.6B.100d`.
    Alias(&'a str),
}

impl<'a> From<&'a EmbeddingTable> for VectorSource<'a> {
    fn from(table: &'a EmbeddingTable) -> Self {
        VectorSource::Table(table)
    }
}

impl<'a> From<&'a str> for VectorSource<'a> {
    fn from(alias: &'a str) -> Self {
        VectorSource::Alias(alias)
    }
}

impl<'a> VectorSource<'a> {
    /// Resolve to a table; aliases are loaded through `loader`.
    ///
    /// ## Errors
    /// * [`WordvecError::Validation`] for an unknown alias.
    pub fn resolve(
        &self,
        loader: &mut dyn SourceLoader,
    ) -> WVResult<Cow<'a, EmbeddingTable>> {
        match *self {
            VectorSource::Table(table) => Ok(Cow::Borrowed(table)),
            VectorSource::Alias(name) => {
                let source = PretrainedSource::from_str(name).map_err(|_| {
                    WordvecError::Validation(format!(
                        "got string input vector {name:?}, but allowed pretrained vectors are {:?}",
                        crate::pretrained::list_sources()
                    ))
                })?;
                Ok(Cow::Owned(source.load(loader)?))
            }
        }
    }
}

impl Vocabulary {
    /// The attached vectors, if any.
    pub fn vectors(&self) -> Option<&VectorMatrix> {
        self.vectors.as_ref()
    }

    /// The attached vectors.
    ///
    /// ## Errors
    /// * [`WordvecError::Validation`] if no vectors are attached.
    pub fn require_vectors(&self) -> WVResult<&VectorMatrix> {
        self.vectors.as_ref().ok_or_else(|| {
            WordvecError::Validation("unattached vectors used where required".to_string())
        })
    }

    /// Detach any vectors.
    pub fn clear_vectors(&mut self) {
        self.vectors = None;
    }

    /// Resolve `sources` and attach their concatenated vectors.
    ///
    /// ## Arguments
    /// * `sources` - tables or pretrained aliases, concatenated in order.
    /// * `loader` - loads aliased sources.
    /// * `unk_init` - the vector for tokens a source lacks.
    ///
    /// ## Errors
    /// * [`WordvecError::Validation`] for an empty list or an unknown alias.
    /// * Any error from loading an aliased source.
    pub fn load_vectors(
        &mut self,
        sources: &[VectorSource<'_>],
        loader: &mut dyn SourceLoader,
        unk_init: UnkInit,
    ) -> WVResult<()> {
        if sources.is_empty() {
            return Err(WordvecError::Validation(
                "load_vectors requires at least one source".to_string(),
            ));
        }
        let tables = sources
            .iter()
            .map(|s| s.resolve(&mut *loader))
            .collect::<WVResult<Vec<_>>>()?;
        let tables: Vec<&EmbeddingTable> = tables.iter().map(|t| t.as_ref()).collect();
        self.attach_tables(&tables, unk_init)
    }

    /// Attach the concatenated vectors of already loaded `tables`.
    ///
    /// Row `i` is `tables[0][itos[i]] ++ tables[1][itos[i]] ++ ...`.
    pub fn attach_tables(
        &mut self,
        tables: &[&EmbeddingTable],
        unk_init: UnkInit,
    ) -> WVResult<()> {
        if tables.is_empty() {
            return Err(WordvecError::Validation(
                "load_vectors requires at least one source".to_string(),
            ));
        }

        let total_dim = tables.iter().map(|t| t.dim()).sum();
        let mut matrix = VectorMatrix::zeros(self.len(), total_dim);
        for (i, token) in self.itos().iter().enumerate() {
            let row = matrix.row_mut(i);
            let mut start = 0;
            for table in tables {
                let end = start + table.dim();
                row[start..end].copy_from_slice(&table.vector_of_with(token, unk_init)?);
                start = end;
            }
        }

        log::debug!(
            "Attached {total_dim}-dimensional vectors from {} tables to {} tokens",
            tables.len(),
            self.len()
        );
        self.vectors = Some(matrix);
        Ok(())
    }

    /// Attach vectors from an arbitrary `token -> row` index over `vectors`.
    ///
    /// ## Arguments
    /// * `stoi` - maps tokens to rows of `vectors`.
    /// * `vectors` - the source rows.
    /// * `dim` - the expected row width.
    /// * `unk_init` - the vector for tokens `stoi` lacks.
    ///
    /// ## Errors
    /// * [`WordvecError::DimensionMismatch`] if `vectors.dim() != dim`.
    /// * [`WordvecError::Validation`] if `stoi` points past the last row.
    pub fn set_vectors(
        &mut self,
        stoi: &WVHashMap<String, usize>,
        vectors: &VectorMatrix,
        dim: usize,
        unk_init: UnkInit,
    ) -> WVResult<()> {
        check_dim(dim, vectors.dim())?;

        let unk = unk_init.init(dim)?;
        let mut matrix = VectorMatrix::zeros(self.len(), dim);
        for (i, token) in self.itos().iter().enumerate() {
            let src = match stoi.get(token) {
                Some(&wi) => vectors.row(wi).ok_or_else(|| {
                    WordvecError::Validation(format!(
                        "index {wi} for token {token:?} is out of range for {} rows",
                        vectors.rows()
                    ))
                })?,
                None => &unk[..],
            };
            matrix.row_mut(i).copy_from_slice(src);
        }

        self.vectors = Some(matrix);
        Ok(())
    }
}
