/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fastwire Codec
//!
//! FAST (FIX Adapted for Streaming) presence-map codec for the fastwire
//! runtime.
//!
//! FAST compresses repetitive structured market-data records by omitting
//! fields from the wire; the presence map is the bit-packed sideband that
//! tells the decoder which fields were actually sent. This crate implements
//! that codec against the byte streaming contracts in `fastwire-core`:
//!
//! - **Stop-bit framing**: the map ends at the first byte with bit 0x80 set
//! - **Canonical emission**: trailing zero bytes are trimmed so every bit
//!   sequence has exactly one minimal encoding
//! - **Dual addressing**: sequential cursor access for decoding, absolute
//!   bit indexing for random queries

pub mod error;
pub mod pmap;

pub use error::CodecError;
pub use pmap::{PresenceMap, DATA_BITS, STOP_BIT};
