//! Error types for page encoding.
//!
//! This module defines all possible errors that can occur while encoding a
//! page into a printer command stream.

use thiserror::Error;

/// Main error type for page encoding operations.
///
/// Any failure aborts the current page; the encoder never retries. A fresh
/// call with a fresh sink starts over from a clean state.
#[derive(Error, Debug)]
pub enum Error {
    /// Writing to the output sink failed.
    ///
    /// The command stream written so far is incomplete and must be
    /// discarded; there is no partial-page recovery.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A band or scratch buffer could not be allocated.
    #[error("buffer allocation failed")]
    OutOfMemory,

    /// Resolution is not one the print mechanism supports.
    ///
    /// Each axis must be either 180 or 360 dots per inch; 360 dpi is
    /// produced by interleaving two 180 dpi passes.
    #[error("unsupported resolution: {0} dpi")]
    UnsupportedResolution(u32),

    /// Invalid configuration parameter provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
