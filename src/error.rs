use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::letters::LetterMultiset;

/// The word list could not be read.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Two nodes were merged under different keys. This is a broken invariant
/// in the engine, not something a caller can recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("cannot merge alphagram `{right}` into `{left}`")]
    IncompatibleMerge {
        left: LetterMultiset,
        right: LetterMultiset,
    },
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error("decomposition index corrupted: {0}")]
    Merge(#[from] MergeError),
}
