/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Byte sources for wire decoding.
//!
//! A [`ByteSource`] hands out one byte at a time in strict FIFO order.
//! Decoders pull from a source until it reports end-of-input; how the bytes
//! were buffered or framed upstream is invisible to them.

use std::io::{ErrorKind, Read};

/// Number of bytes read ahead from an underlying stream per refill.
pub const READ_CHUNK_SIZE: usize = 4096;

/// A FIFO supplier of single bytes.
///
/// `get_byte` returns `Some(byte)` while input is available and `None` at
/// end-of-input or on an unrecoverable read failure. End-of-input is sticky:
/// once `None` has been returned, every later call returns `None`.
pub trait ByteSource {
    /// Returns the next byte, or `None` when the input is exhausted.
    fn get_byte(&mut self) -> Option<u8>;
}

/// A byte source over a borrowed slice.
///
/// Used for decoding from in-memory packets and for test vectors.
#[derive(Debug, Clone)]
pub struct SliceByteSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceByteSource<'a> {
    /// Creates a source reading from `data`, starting at the first byte.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Returns how many bytes have not yet been consumed.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl ByteSource for SliceByteSource<'_> {
    #[inline]
    fn get_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.position).copied()?;
        self.position += 1;
        Some(byte)
    }
}

/// A read-ahead buffered source over a blocked input stream.
///
/// Reads from the underlying stream in chunks of [`READ_CHUNK_SIZE`] bytes.
/// The stream must be opened in binary mode; partial chunks are legal. A read
/// error (other than an interrupt, which is retried) is treated the same as
/// end-of-input and is sticky.
#[derive(Debug)]
pub struct StreamByteSource<R> {
    reader: R,
    buffer: Box<[u8]>,
    used: usize,
    position: usize,
    end_of_input: bool,
}

impl<R: Read> StreamByteSource<R> {
    /// Wraps a binary stream into a byte source.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: vec![0u8; READ_CHUNK_SIZE].into_boxed_slice(),
            used: 0,
            position: 0,
            end_of_input: false,
        }
    }

    /// Consumes the source, returning the underlying stream.
    ///
    /// Bytes already read ahead into the internal buffer are lost.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn refill(&mut self) -> bool {
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.end_of_input = true;
                    return false;
                }
                Ok(n) => {
                    self.used = n;
                    self.position = 0;
                    return true;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => {
                    self.end_of_input = true;
                    return false;
                }
            }
        }
    }
}

impl<R: Read> ByteSource for StreamByteSource<R> {
    fn get_byte(&mut self) -> Option<u8> {
        if self.position >= self.used {
            if self.end_of_input || !self.refill() {
                return None;
            }
        }
        let byte = self.buffer[self.position];
        self.position += 1;
        Some(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_slice_source_fifo() {
        let data = [0x01, 0x02, 0x83];
        let mut source = SliceByteSource::new(&data);

        assert_eq!(source.remaining(), 3);
        assert_eq!(source.get_byte(), Some(0x01));
        assert_eq!(source.get_byte(), Some(0x02));
        assert_eq!(source.get_byte(), Some(0x83));
        assert_eq!(source.get_byte(), None);
        assert_eq!(source.get_byte(), None);
    }

    #[test]
    fn test_stream_source_reads_binary_data() {
        let data: Vec<u8> = vec![0x00, 0xFF, 0x80, 0x7F];
        let mut source = StreamByteSource::new(Cursor::new(data.clone()));

        let mut seen = Vec::new();
        while let Some(byte) = source.get_byte() {
            seen.push(byte);
        }
        assert_eq!(seen, data);
    }

    #[test]
    fn test_stream_source_spans_chunk_boundary() {
        // Two full chunks plus a partial one.
        let len = READ_CHUNK_SIZE * 2 + 17;
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let mut source = StreamByteSource::new(Cursor::new(data.clone()));

        for (i, expected) in data.iter().enumerate() {
            assert_eq!(source.get_byte(), Some(*expected), "byte {}", i);
        }
        assert_eq!(source.get_byte(), None);
    }

    #[test]
    fn test_stream_source_eof_is_sticky() {
        let mut source = StreamByteSource::new(Cursor::new(vec![0x42]));
        assert_eq!(source.get_byte(), Some(0x42));
        assert_eq!(source.get_byte(), None);
        assert_eq!(source.get_byte(), None);
    }

    /// A reader that yields its data in deliberately tiny partial reads.
    struct DribbleReader {
        data: Vec<u8>,
        position: usize,
    }

    impl Read for DribbleReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.position >= self.data.len() {
                return Ok(0);
            }
            let n = (self.data.len() - self.position).min(3).min(buf.len());
            buf[..n].copy_from_slice(&self.data[self.position..self.position + n]);
            self.position += n;
            Ok(n)
        }
    }

    #[test]
    fn test_stream_source_tolerates_partial_reads() {
        let data: Vec<u8> = (0u8..100).collect();
        let mut source = StreamByteSource::new(DribbleReader {
            data: data.clone(),
            position: 0,
        });

        let mut seen = Vec::new();
        while let Some(byte) = source.get_byte() {
            seen.push(byte);
        }
        assert_eq!(seen, data);
    }
}
