//! # Frequency-Ranked Vocabulary

use std::cmp::Ordering;

use crate::{
    types::{UNK_INDEX, UNK_TOKEN, WVHashMap, WVHashSet},
    vocab::VectorMatrix,
};

/// The default special tokens.
pub const DEFAULT_SPECIALS: &[&str] = &["<pad>"];

/// Options for [`Vocabulary::build`].
#[derive(Clone, Debug, PartialEq)]
pub struct VocabOptions {
    /// Maximum number of ranked (non-prefix) tokens; `None` for no limit.
    pub max_size: Option<usize>,

    /// Minimum count for a ranked token; values below 1 act as 1.
    pub min_freq: usize,

    /// Special tokens placed right after `<unk>`, in order.
    pub specials: Vec<String>,
}

impl Default for VocabOptions {
    fn default() -> Self {
        Self {
            max_size: None,
            min_freq: 1,
            specials: DEFAULT_SPECIALS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl VocabOptions {
    /// Set the max size.
    pub fn with_max_size(
        mut self,
        max_size: Option<usize>,
    ) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum frequency.
    pub fn with_min_freq(
        mut self,
        min_freq: usize,
    ) -> Self {
        self.min_freq = min_freq;
        self
    }

    /// Replace the special tokens.
    pub fn with_specials<W, S>(
        mut self,
        specials: W,
    ) -> Self
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.specials = specials.into_iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// `<unk>` followed by the specials, first occurrence wins.
    pub fn required_prefix(&self) -> Vec<String> {
        let mut seen = WVHashSet::default();
        core::iter::once(UNK_TOKEN.to_string())
            .chain(self.specials.iter().cloned())
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }
}

/// A deterministic token <-> index mapping.
///
/// * `itos()[0]` is always `<unk>`, followed by the specials.
/// * Ranked tokens follow, by count descending then token ascending.
/// * Unknown tokens look up as [`UNK_INDEX`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    freqs: WVHashMap<String, usize>,
    itos: Vec<String>,
    stoi: WVHashMap<String, usize>,
    pub(crate) vectors: Option<VectorMatrix>,
}

impl Vocabulary {
    /// Build a vocabulary from token counts.
    ///
    /// Repeated tokens in `counts` are summed.
    pub fn build<I, S>(
        counts: I,
        options: &VocabOptions,
    ) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut freqs: WVHashMap<String, usize> = WVHashMap::default();
        for (token, count) in counts {
            *freqs.entry(token.into()).or_default() += count;
        }

        let min_freq = options.min_freq.max(1);
        let prefix = options.required_prefix();
        let limit = options.max_size.map(|m| m.saturating_add(prefix.len()));

        let mut vocab = Self {
            freqs,
            itos: Vec::new(),
            stoi: WVHashMap::default(),
            vectors: None,
        };
        for token in prefix {
            vocab.push(token);
        }

        // Prefix tokens never compete on their own counts.
        let mut ranked: Vec<(&String, usize)> = vocab
            .freqs
            .iter()
            .filter(|(token, _)| !vocab.stoi.contains_key(token.as_str()))
            .map(|(token, &count)| (token, count))
            .collect();
        ranked.sort_unstable_by(rank_order);

        let mut accepted = Vec::new();
        for (token, count) in ranked {
            if count < min_freq || limit.is_some_and(|l| vocab.itos.len() + accepted.len() >= l) {
                break;
            }
            accepted.push(token.clone());
        }
        for token in accepted {
            vocab.push(token);
        }

        log::debug!(
            "Built vocabulary of {} tokens from {} distinct counts",
            vocab.len(),
            vocab.freqs.len()
        );
        vocab
    }

    fn push(
        &mut self,
        token: String,
    ) {
        self.stoi.insert(token.clone(), self.itos.len());
        self.itos.push(token);
    }

    /// Append the tokens of `other` that this vocabulary lacks.
    ///
    /// Existing indices never change; new tokens take the next indices,
    /// in `other`'s order, or lexical order if `sort` is set.
    ///
    /// Attached vectors are dropped, since they no longer cover every row.
    pub fn extend(
        &mut self,
        other: &Vocabulary,
        sort: bool,
    ) {
        let mut words: Vec<&String> = other.itos.iter().collect();
        if sort {
            words.sort();
        }

        let before = self.len();
        for word in words {
            if !self.stoi.contains_key(word.as_str()) {
                self.push(word.clone());
            }
        }
        if self.len() != before {
            self.vectors = None;
        }
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.itos.len()
    }

    /// Check if the vocabulary is empty; never true for a built vocabulary.
    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    /// The source counts.
    pub fn freqs(&self) -> &WVHashMap<String, usize> {
        &self.freqs
    }

    /// Index to token.
    pub fn itos(&self) -> &[String] {
        &self.itos
    }

    /// Token to index; see [`Self::lookup_index`] for the unknown fallback.
    pub fn stoi(&self) -> &WVHashMap<String, usize> {
        &self.stoi
    }

    /// The index of `token`; [`UNK_INDEX`] if absent.
    pub fn lookup_index(
        &self,
        token: &str,
    ) -> usize {
        self.stoi.get(token).copied().unwrap_or(UNK_INDEX)
    }

    /// The token at `index`, if in range.
    pub fn lookup_token(
        &self,
        index: usize,
    ) -> Option<&str> {
        self.itos.get(index).map(|s| s.as_str())
    }

    /// Check if `token` has its own index.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.stoi.contains_key(token)
    }

    /// Map tokens to indices.
    pub fn numericalize<'a, I>(
        &self,
        tokens: I,
    ) -> Vec<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens.into_iter().map(|t| self.lookup_index(t)).collect()
    }
}

/// Count descending, then token ascending.
fn rank_order(
    a: &(&String, usize),
    b: &(&String, usize),
) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}
