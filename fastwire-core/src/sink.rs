/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Byte sinks for wire encoding.

use bytes::{BufMut, BytesMut};

/// An append-only consumer of single bytes.
///
/// A sink never fails under normal operation: it either grows in memory or
/// forwards to an unbuffered downstream. Encoders emit into a sink one byte
/// at a time; ordering is preserved.
pub trait ByteSink {
    /// Appends one byte to the sink.
    fn put_byte(&mut self, byte: u8);
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn put_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

impl ByteSink for BytesMut {
    #[inline]
    fn put_byte(&mut self, byte: u8) {
        self.put_u8(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_preserves_order() {
        let mut sink: Vec<u8> = Vec::new();
        sink.put_byte(0x10);
        sink.put_byte(0x20);
        sink.put_byte(0x80);
        assert_eq!(sink, vec![0x10, 0x20, 0x80]);
    }

    #[test]
    fn test_bytes_mut_sink() {
        let mut sink = BytesMut::new();
        sink.put_byte(0xD0);
        sink.put_byte(0x00);
        assert_eq!(&sink[..], &[0xD0, 0x00]);
    }
}
