//! Search policies. None of them affect which phrases are correct, only how
//! soon one is found.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Order in which dictionary length buckets are fed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketOrder {
    /// Most letters first. Real solutions tend to use few, long words.
    #[default]
    LongestFirst,
    ShortestFirst,
    /// Buckets in order of first appearance in the word list.
    AsLoaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bucket order `{0}` (expected longest, shortest or loaded)")]
pub struct ParseBucketOrderError(String);

impl FromStr for BucketOrder {
    type Err = ParseBucketOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "longest" => Ok(BucketOrder::LongestFirst),
            "shortest" => Ok(BucketOrder::ShortestFirst),
            "loaded" => Ok(BucketOrder::AsLoaded),
            other => Err(ParseBucketOrderError(other.to_owned())),
        }
    }
}

impl fmt::Display for BucketOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BucketOrder::LongestFirst => "longest",
            BucketOrder::ShortestFirst => "shortest",
            BucketOrder::AsLoaded => "loaded",
        })
    }
}

/// How candidates already enumerated are recognized on later passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateDedup {
    /// By structural fingerprint: a candidate whose children grew since it
    /// was last checked is enumerated again.
    #[default]
    Structural,
    /// No skipping: every candidate is enumerated again after each bucket.
    Off,
}

#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    pub bucket_order: BucketOrder,
    pub dedup: CandidateDedup,
    /// Check word orderings on the rayon pool.
    pub parallel_verify: bool,
}
