//! Finds the rearrangement of a phrase into dictionary words whose digest
//! matches a known token.
//!
//! The search never enumerates word sequences directly. Dictionary words are
//! reduced to their *alphagram* (sorted letters), and the engine records, for
//! every letter multiset that fits inside the target, which words spell it
//! and which pairs of smaller multisets add up to it. Whenever a new word
//! completes the target together with something already indexed, the
//! resulting candidate is expanded into phrases and every word order of
//! each phrase is checked against the digest.
//!
//! ```no_run
//! use alphagram_search::{solve, LetterLimits, WordSource};
//!
//! let words = WordSource::from_path("words.txt", LetterLimits::default())?;
//! if let Some(phrase) = solve("poultry outwits ants", "e4820b45d2277f3844eac66c903e84be", &words)? {
//!     println!("{}", phrase);
//! }
//! # Ok::<(), alphagram_search::SolveError>(())
//! ```

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod index;
pub mod letters;
pub mod node;
pub mod verify;

pub use config::{BucketOrder, CandidateDedup, SearchConfig};
pub use dictionary::{LetterLimits, WordSource};
pub use engine::{solve, solve_from_path, solve_with, SearchEngine, SearchStats};
pub use error::{DictionaryError, MergeError, SolveError};
pub use index::DecompositionIndex;
pub use letters::LetterMultiset;
pub use node::{AlphagramNode, NodeArena, NodeId};
pub use verify::{Md5Digest, PhraseDigest, Verifier};
