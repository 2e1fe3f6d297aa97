//! # Nearest Neighbor Search

use core::cmp::Ordering;

use crate::{
    embeddings::EmbeddingTable,
    errors::{WVResult, WordvecError, check_dim},
    search::distance::{Distance, Euclidean},
    types::{WVHashMap, WVHashSet},
};

/// A search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// The table token.
    pub token: String,

    /// The distance from the query.
    pub distance: f32,
}

/// Ascending distance; ties broken by table index.
fn hit_order(
    a: &(f32, usize),
    b: &(f32, usize),
) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Score every row of `table` against `query`.
fn score_rows<D: Distance + ?Sized>(
    table: &EmbeddingTable,
    query: &[f32],
    metric: &D,
) -> Vec<(f32, usize)> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;

            table
                .vectors()
                .par_chunks_exact(table.dim())
                .enumerate()
                .map(|(idx, row)| (metric.distance_unchecked(query, row), idx))
                .collect()
        } else {
            score_rows_serial(table, query, metric)
        }
    }
}

/// Single-threaded [`score_rows`]; same output, same order.
#[cfg_attr(feature = "rayon", allow(dead_code))]
fn score_rows_serial<D: Distance + ?Sized>(
    table: &EmbeddingTable,
    query: &[f32],
    metric: &D,
) -> Vec<(f32, usize)> {
    table
        .rows()
        .enumerate()
        .map(|(idx, row)| (metric.distance_unchecked(query, row), idx))
        .collect()
}

/// The `n` rows of `table` closest to `query` under [`Euclidean`] distance.
///
/// See [`nearest_by`].
pub fn nearest(
    table: &EmbeddingTable,
    query: &[f32],
    n: usize,
) -> WVResult<Vec<Neighbor>> {
    nearest_by(table, query, n, &Euclidean)
}

/// The `n` rows of `table` closest to `query` under `metric`.
///
/// ## Arguments
/// * `table` - the table to scan; every row is scored.
/// * `query` - a vector of width `table.dim()`.
/// * `n` - the number of hits; more than `table.len()` returns every row.
/// * `metric` - the distance.
///
/// ## Returns
/// Hits by ascending distance; equal distances keep table order.
///
/// ## Errors
/// * [`WordvecError::DimensionMismatch`] if `query.len() != table.dim()`.
pub fn nearest_by<D: Distance + ?Sized>(
    table: &EmbeddingTable,
    query: &[f32],
    n: usize,
    metric: &D,
) -> WVResult<Vec<Neighbor>> {
    check_dim(table.dim(), query.len())?;
    if n == 0 || table.is_empty() {
        return Ok(Vec::new());
    }

    let mut hits = score_rows(table, query, metric);
    if n < hits.len() {
        hits.select_nth_unstable_by(n, hit_order);
        hits.truncate(n);
    }
    // Keys are unique by index.
    hits.sort_unstable_by(hit_order);

    let tokens = table.tokens();
    Ok(hits
        .into_iter()
        .map(|(distance, idx)| Neighbor {
            token: tokens[idx].clone(),
            distance,
        })
        .collect())
}

/// Count occurrences of each word.
pub fn count_tokens<I, S>(words: I) -> WVHashMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: WVHashMap<String, usize> = WVHashMap::default();
    for word in words {
        let word = word.as_ref();
        match counts.get_mut(word) {
            Some(c) => *c += 1,
            None => {
                counts.insert(word.to_string(), 1);
            }
        }
    }
    counts
}

/// The count-weighted mean of the vectors of `token_counts`.
///
/// Tokens missing from `table` contribute its unknown vector.
///
/// ## Errors
/// * [`WordvecError::EmptyInput`] if there are no tokens, or every count is 0.
pub fn weighted_aggregate(
    table: &EmbeddingTable,
    token_counts: &WVHashMap<String, usize>,
) -> WVResult<Vec<f32>> {
    let total: usize = token_counts.values().sum();
    if total == 0 {
        return Err(WordvecError::EmptyInput(
            "aggregate over zero token occurrences".to_string(),
        ));
    }

    let mut tokens: Vec<(&String, usize)> = token_counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(t, &c)| (t, c))
        .collect();
    tokens.sort_unstable();

    let mut acc = vec![0.0f32; table.dim()];
    for (token, count) in tokens {
        let v = table.vector_of(token)?;
        let weight = count as f32;
        for (a, x) in acc.iter_mut().zip(v.iter()) {
            *a += x * weight;
        }
    }

    let total = total as f32;
    acc.iter_mut().for_each(|a| *a /= total);
    Ok(acc)
}

/// The tokens found in every token's own top-`n` neighbors.
///
/// ## Errors
/// * [`WordvecError::EmptyInput`] if `tokens` is empty.
pub fn intersect_neighbors<S: AsRef<str>>(
    table: &EmbeddingTable,
    tokens: &[S],
    n: usize,
) -> WVResult<WVHashSet<String>> {
    intersect_neighbors_by(table, tokens, n, &Euclidean)
}

/// [`intersect_neighbors`] under `metric`.
pub fn intersect_neighbors_by<S: AsRef<str>, D: Distance + ?Sized>(
    table: &EmbeddingTable,
    tokens: &[S],
    n: usize,
    metric: &D,
) -> WVResult<WVHashSet<String>> {
    let mut common: Option<WVHashSet<String>> = None;
    for token in tokens {
        let query = table.vector_of(token.as_ref())?;
        let hits: WVHashSet<String> = nearest_by(table, &query, n, metric)?
            .into_iter()
            .map(|hit| hit.token)
            .collect();
        common = Some(match common {
            None => hits,
            Some(acc) => acc.into_iter().filter(|t| hits.contains(t)).collect(),
        });
    }
    common.ok_or_else(|| WordvecError::EmptyInput("intersection over zero tokens".to_string()))
}

/// A table bundled with a metric.
#[derive(Debug, Clone, Copy)]
pub struct NeighborSearch<'a, D: Distance = Euclidean> {
    table: &'a EmbeddingTable,
    metric: D,
}

impl<'a> NeighborSearch<'a, Euclidean> {
    /// Search `table` by [`Euclidean`] distance.
    pub fn new(table: &'a EmbeddingTable) -> Self {
        Self {
            table,
            metric: Euclidean,
        }
    }
}

impl<'a, D: Distance> NeighborSearch<'a, D> {
    /// Search `table` by `metric`.
    pub fn with_metric(
        table: &'a EmbeddingTable,
        metric: D,
    ) -> Self {
        Self { table, metric }
    }

    /// The table.
    pub fn table(&self) -> &'a EmbeddingTable {
        self.table
    }

    /// The metric.
    pub fn metric(&self) -> &D {
        &self.metric
    }

    /// See [`nearest_by`].
    pub fn nearest(
        &self,
        query: &[f32],
        n: usize,
    ) -> WVResult<Vec<Neighbor>> {
        nearest_by(self.table, query, n, &self.metric)
    }

    /// The neighbors of `token`'s own vector; the token itself is usually first.
    pub fn nearest_to_token(
        &self,
        token: &str,
        n: usize,
    ) -> WVResult<Vec<Neighbor>> {
        let query = self.table.vector_of(token)?;
        self.nearest(&query, n)
    }

    /// See [`weighted_aggregate`].
    pub fn aggregate(
        &self,
        token_counts: &WVHashMap<String, usize>,
    ) -> WVResult<Vec<f32>> {
        weighted_aggregate(self.table, token_counts)
    }

    /// See [`intersect_neighbors`].
    pub fn intersect<S: AsRef<str>>(
        &self,
        tokens: &[S],
        n: usize,
    ) -> WVResult<WVHashSet<String>> {
        intersect_neighbors_by(self.table, tokens, n, &self.metric)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::search::distance::Cosine;

    fn pets() -> EmbeddingTable {
        EmbeddingTable::from_rows([
            ("cat", vec![0.0, 0.0]),
            ("dog", vec![1.0, 0.0]),
            ("puppy", vec![1.0, 0.1]),
        ])
        .unwrap()
    }

    fn tokens(hits: &[Neighbor]) -> Vec<&str> {
        hits.iter().map(|h| h.token.as_str()).collect()
    }

    #[test]
    fn test_nearest() {
        let table = pets();
        let hits = nearest(&table, &[1.0, 0.0], 2).unwrap();
        assert_eq!(tokens(&hits), vec!["dog", "puppy"]);
        assert_eq!(hits[0].distance, 0.0);
        assert!((hits[1].distance - 0.1).abs() < 1e-6);

        assert_eq!(nearest(&table, &[1.0, 0.0], 10).unwrap().len(), 3);
        assert!(nearest(&table, &[1.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_pets_on_axes() {
        let table = EmbeddingTable::from_rows([
            ("cat", vec![1.0, 0.0]),
            ("dog", vec![0.0, 1.0]),
            ("puppy", vec![0.1, 0.9]),
        ])
        .unwrap();
        let query = table.vector_of("dog").unwrap();
        assert_eq!(
            tokens(&nearest(&table, &query, 2).unwrap()),
            vec!["dog", "puppy"]
        );

        let counts = count_tokens(["cat", "dog"]);
        assert_eq!(weighted_aggregate(&table, &counts).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_nearest_ties_keep_table_order() {
        let table = EmbeddingTable::from_rows([
            ("west", vec![-1.0, 0.0]),
            ("east", vec![1.0, 0.0]),
            ("north", vec![0.0, 1.0]),
            ("far", vec![5.0, 5.0]),
        ])
        .unwrap();
        let hits = nearest(&table, &[0.0, 0.0], 2).unwrap();
        assert_eq!(tokens(&hits), vec!["west", "east"]);
        let hits = nearest(&table, &[0.0, 0.0], 4).unwrap();
        assert_eq!(tokens(&hits), vec!["west", "east", "north", "far"]);
    }

    #[test]
    fn test_nearest_query_width() {
        assert!(matches!(
            nearest(&pets(), &[1.0], 2),
            Err(WordvecError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_nearest_by_cosine() {
        let table = EmbeddingTable::from_rows([
            ("long", vec![10.0, 0.0]),
            ("diag", vec![1.0, 1.0]),
            ("short", vec![0.1, 0.0]),
        ])
        .unwrap();
        let hits = nearest_by(&table, &[1.0, 0.0], 2, &Cosine).unwrap();
        assert_eq!(tokens(&hits), vec!["long", "short"]);
    }

    #[test]
    fn test_count_tokens() {
        let counts = count_tokens(["a", "b", "a"]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["a"], 2);
        assert_eq!(counts["b"], 1);
    }

    #[test]
    fn test_weighted_aggregate() {
        let table = pets();
        let counts = count_tokens(["dog", "dog", "cat", "zebra"]);
        let v = weighted_aggregate(&table, &counts).unwrap();
        // (2 * dog + cat + unk) / 4
        assert_eq!(v, vec![0.5, 0.0]);

        assert!(matches!(
            weighted_aggregate(&table, &WVHashMap::default()),
            Err(WordvecError::EmptyInput(_))
        ));
        let mut zeros = WVHashMap::default();
        zeros.insert("dog".to_string(), 0);
        assert!(matches!(
            weighted_aggregate(&table, &zeros),
            Err(WordvecError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_intersect_neighbors() {
        let table = pets();
        let common = intersect_neighbors(&table, &["dog", "puppy"], 2).unwrap();
        let mut common: Vec<String> = common.into_iter().collect();
        common.sort();
        assert_eq!(common, vec!["dog", "puppy"]);

        let common = intersect_neighbors(&table, &["cat", "puppy"], 1).unwrap();
        assert!(common.is_empty());

        assert!(matches!(
            intersect_neighbors::<&str>(&table, &[], 2),
            Err(WordvecError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_neighbor_search() {
        let table = pets();
        let search = NeighborSearch::new(&table);
        assert_eq!(
            tokens(&search.nearest_to_token("puppy", 2).unwrap()),
            vec!["puppy", "dog"]
        );
        let counts = count_tokens(["dog"]);
        assert_eq!(search.aggregate(&counts).unwrap(), vec![1.0, 0.0]);
        assert_eq!(search.intersect(&["dog"], 1).unwrap().len(), 1);

        let cosine = NeighborSearch::with_metric(&table, Cosine);
        assert_eq!(cosine.table().len(), 3);
    }

    proptest! {
        #[test]
        fn prop_nearest_is_sorted_prefix(
            rows in proptest::collection::vec(proptest::collection::vec(-5.0f32..5.0, 3), 1..30),
            query in proptest::collection::vec(-5.0f32..5.0, 3),
            n in 0..40usize,
        ) {
            let table = EmbeddingTable::from_rows(
                rows.iter().enumerate().map(|(i, r)| (format!("t{i}"), r.clone())),
            ).unwrap();

            let all = nearest(&table, &query, table.len()).unwrap();
            let top = nearest(&table, &query, n).unwrap();

            prop_assert_eq!(top.len(), n.min(table.len()));
            prop_assert_eq!(&all[..top.len()], &top[..]);
            for w in all.windows(2) {
                prop_assert!(w[0].distance <= w[1].distance);
            }
        }

        #[test]
        fn prop_nearest_matches_stable_sort(
            rows in proptest::collection::vec(proptest::collection::vec(-2i8..3, 2), 1..30),
            query in proptest::collection::vec(-2i8..3, 2),
            n in 0..40usize,
        ) {
            // Small integer grids put many rows at exactly the same distance.
            let table = EmbeddingTable::from_rows(rows.iter().enumerate().map(|(i, r)| {
                (format!("t{i}"), r.iter().map(|&x| f32::from(x)).collect::<Vec<f32>>())
            }))
            .unwrap();
            let query: Vec<f32> = query.iter().map(|&x| f32::from(x)).collect();

            let mut expected: Vec<(f32, usize)> = table
                .rows()
                .enumerate()
                .map(|(idx, row)| (Euclidean.distance(&query, row).unwrap(), idx))
                .collect();
            expected.sort_by(|a, b| a.0.total_cmp(&b.0));
            expected.truncate(n);

            let hits = nearest(&table, &query, n).unwrap();
            prop_assert_eq!(hits.len(), expected.len());
            for (hit, (distance, idx)) in hits.iter().zip(&expected) {
                prop_assert_eq!(&hit.token, &table.tokens()[*idx]);
                prop_assert_eq!(hit.distance, *distance);
            }

            prop_assert_eq!(
                score_rows(&table, &query, &Euclidean),
                score_rows_serial(&table, &query, &Euclidean)
            );
        }
    }
}
