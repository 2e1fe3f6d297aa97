//! # `GloVe` Pretrained Sources

use crate::{
    embeddings::EmbeddingTable,
    errors::WVResult,
    pretrained::{ConstSourceDescriptor, SourceLoader},
};

/// Shared cache context key.
pub const GLOVE_KEY: &str = "glove";

const GLOVE_42B_URL: &str = "http://nlp.stanford.edu/data/glove.42B.300d.zip";
const GLOVE_840B_URL: &str = "http://nlp.stanford.edu/data/glove.840B.300d.zip";
const GLOVE_TWITTER_27B_URL: &str = "http://nlp.stanford.edu/data/glove.twitter.27B.zip";
const GLOVE_6B_URL: &str = "http://nlp.stanford.edu/data/glove.6B.zip";

macro_rules! glove_source {
    ($corpus:literal, $dim:literal, $url:expr) => {
        ConstSourceDescriptor {
            name: concat!("glove.", $corpus, ".", $dim, "d"),
            context: GLOVE_KEY,
            file_name: concat!("glove.", $corpus, ".", $dim, "d.txt"),
            url: $url,
            dim: $dim,
        }
    };
}

/// "`glove.42B.300d`": Common Crawl, 42B tokens, uncased.
pub const GLOVE_42B_300D: ConstSourceDescriptor = glove_source!("42B", 300, GLOVE_42B_URL);

/// "`glove.840B.300d`": Common Crawl, 840B tokens, cased.
pub const GLOVE_840B_300D: ConstSourceDescriptor = glove_source!("840B", 300, GLOVE_840B_URL);

/// "`glove.twitter.27B.25d`".
pub const GLOVE_TWITTER_27B_25D: ConstSourceDescriptor =
    glove_source!("twitter.27B", 25, GLOVE_TWITTER_27B_URL);

/// "`glove.twitter.27B.50d`".
pub const GLOVE_TWITTER_27B_50D: ConstSourceDescriptor =
    glove_source!("twitter.27B", 50, GLOVE_TWITTER_27B_URL);

/// "`glove.twitter.27B.100d`".
pub const GLOVE_TWITTER_27B_100D: ConstSourceDescriptor =
    glove_source!("twitter.27B", 100, GLOVE_TWITTER_27B_URL);

/// "`glove.twitter.27B.200d`".
pub const GLOVE_TWITTER_27B_200D: ConstSourceDescriptor =
    glove_source!("twitter.27B", 200, GLOVE_TWITTER_27B_URL);

/// "`glove.6B.50d`": Wikipedia 2014 + Gigaword 5.
pub const GLOVE_6B_50D: ConstSourceDescriptor = glove_source!("6B", 50, GLOVE_6B_URL);

/// "`glove.6B.100d`".
pub const GLOVE_6B_100D: ConstSourceDescriptor = glove_source!("6B", 100, GLOVE_6B_URL);

/// "`glove.6B.200d`".
pub const GLOVE_6B_200D: ConstSourceDescriptor = glove_source!("6B", 200, GLOVE_6B_URL);

/// "`glove.6B.300d`".
pub const GLOVE_6B_300D: ConstSourceDescriptor = glove_source!("6B", 300, GLOVE_6B_URL);

/// Pretrained embedding sources.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
#[non_exhaustive]
pub enum PretrainedSource {
    /// "`glove.42B.300d`"
    #[strum(serialize = "glove.42B.300d")]
    Glove42B300d,

    /// "`glove.840B.300d`"
    #[strum(serialize = "glove.840B.300d")]
    Glove840B300d,

    /// "`glove.twitter.27B.25d`"
    #[strum(serialize = "glove.twitter.27B.25d")]
    GloveTwitter27B25d,

    /// "`glove.twitter.27B.50d`"
    #[strum(serialize = "glove.twitter.27B.50d")]
    GloveTwitter27B50d,

    /// "`glove.twitter.27B.100d`"
    #[strum(serialize = "glove.twitter.27B.100d")]
    GloveTwitter27B100d,

    /// "`glove.twitter.27B.200d`"
    #[strum(serialize = "glove.twitter.27B.200d")]
    GloveTwitter27B200d,

    /// "`glove.6B.50d`"
    #[strum(serialize = "glove.6B.50d")]
    Glove6B50d,

    /// "`glove.6B.100d`"
    #[strum(serialize = "glove.6B.100d")]
    Glove6B100d,

    /// "`glove.6B.200d`"
    #[strum(serialize = "glove.6B.200d")]
    Glove6B200d,

    /// "`glove.6B.300d`"
    #[strum(serialize = "glove.6B.300d")]
    Glove6B300d,
}

impl PretrainedSource {
    /// The source's descriptor.
    pub fn descriptor(&self) -> &'static ConstSourceDescriptor {
        use PretrainedSource::*;
        match self {
            Glove42B300d => &GLOVE_42B_300D,
            Glove840B300d => &GLOVE_840B_300D,
            GloveTwitter27B25d => &GLOVE_TWITTER_27B_25D,
            GloveTwitter27B50d => &GLOVE_TWITTER_27B_50D,
            GloveTwitter27B100d => &GLOVE_TWITTER_27B_100D,
            GloveTwitter27B200d => &GLOVE_TWITTER_27B_200D,
            Glove6B50d => &GLOVE_6B_50D,
            Glove6B100d => &GLOVE_6B_100D,
            Glove6B200d => &GLOVE_6B_200D,
            Glove6B300d => &GLOVE_6B_300D,
        }
    }

    /// Load the source's table through `loader`.
    pub fn load(
        &self,
        loader: &mut dyn SourceLoader,
    ) -> WVResult<EmbeddingTable> {
        loader.load_source(self.descriptor())
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_names_round_trip_descriptors() {
        for source in PretrainedSource::iter() {
            let descr = source.descriptor();
            assert_eq!(descr.name, source.to_string());
            assert_eq!(descr.file_name, format!("{}.txt", descr.name));
            assert!(descr.name.ends_with(&format!(".{}d", descr.dim)));
            assert_eq!(PretrainedSource::from_str(descr.name).unwrap(), source);
        }
    }

    #[test]
    fn test_file_name_format() {
        assert_eq!(GLOVE_840B_300D.file_name, "glove.840B.300d.txt");
        assert_eq!(GLOVE_TWITTER_27B_25D.file_name, "glove.twitter.27B.25d.txt");
        assert_eq!(
            PretrainedSource::Glove6B100d.descriptor().url,
            "http://nlp.stanford.edu/data/glove.6B.zip"
        );
        assert!(PretrainedSource::from_str("glove.6B.75d").is_err());
    }
}
