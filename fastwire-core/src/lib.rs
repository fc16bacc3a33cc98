/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fastwire Core
//!
//! Shared contracts for the fastwire FAST (FIX Adapted for STreaming) runtime.
//!
//! This crate provides the leaf abstractions the rest of the workspace is
//! built on:
//!
//! - [`ByteSource`] / [`ByteSink`]: minimal single-byte streaming contracts
//!   used by the wire codecs
//! - [`StreamByteSource`]: read-ahead buffered source over any binary stream
//! - [`LogLevel`]: ordered severity levels for consumer log gating

pub mod sink;
pub mod source;
pub mod types;

pub use sink::ByteSink;
pub use source::{ByteSource, SliceByteSource, StreamByteSource};
pub use types::LogLevel;
