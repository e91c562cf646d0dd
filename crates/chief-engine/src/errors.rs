use thiserror::Error;

/// Precondition violations on the input log.
///
/// These are the only caller-visible failures; everything else during a
/// replay is logged and skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("transaction log is empty")]
    EmptyLog,

    #[error("transaction log is not chronological: timestamp regression at position {position}")]
    OutOfOrder { position: usize },
}
