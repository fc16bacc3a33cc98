/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Codec error types.

use thiserror::Error;

/// Errors that can occur while decoding wire data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The byte source was exhausted before the field terminator was seen.
    ///
    /// For a presence map this means no stop bit arrived; the enclosing
    /// template decoder should treat the stream as truncated.
    #[error("unexpected end of input")]
    UnexpectedEof,
}
