/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Packet consumer callback interface.
//!
//! A [`PacketConsumer`] absorbs datagrams from a receiver one at a time, in
//! arrival order, from a single servicing task. It also receives the
//! receiver's error and log callbacks, each of which lets the consumer
//! decide whether ingestion continues.

use async_trait::async_trait;
use fastwire_core::LogLevel;

/// Failure surfaced by [`PacketConsumer::consume_buffer`].
///
/// The receiver never inspects the error beyond its display form, which it
/// forwards to [`PacketConsumer::report_decoding_error`].
pub type ConsumeError = Box<dyn std::error::Error + Send + Sync>;

/// Callback interface for absorbing received packets.
///
/// Implementations must be shareable across tasks (`Send + Sync`); the
/// receiver guarantees that `consume_buffer` itself is never invoked
/// concurrently.
#[async_trait]
pub trait PacketConsumer: Send + Sync {
    /// Called once from `start`, after the socket is bound, before the
    /// first receive is posted.
    fn receiver_started(&self) {}

    /// Absorbs one non-empty datagram.
    ///
    /// Packets arrive in network order. The byte slice is only valid for
    /// the duration of the call; the consumer must copy anything it wants
    /// to retain.
    ///
    /// # Returns
    /// `Ok(true)` to keep receiving, `Ok(false)` to request a stop.
    ///
    /// # Errors
    /// An error does not tear the receiver down: its message is routed to
    /// [`report_decoding_error`](Self::report_decoding_error), which decides
    /// whether to continue.
    async fn consume_buffer(&self, packet: &[u8]) -> Result<bool, ConsumeError>;

    /// Reports an I/O error on the receive path.
    ///
    /// The failed receive's buffer has already been recovered to the idle
    /// pool. Although a `true` return attempts to continue, there is no
    /// guarantee that recovery is possible.
    ///
    /// # Returns
    /// `true` to keep receiving, `false` to request a stop.
    async fn report_communication_error(&self, message: &str) -> bool {
        let _ = message;
        true
    }

    /// Reports a failure raised by [`consume_buffer`](Self::consume_buffer).
    ///
    /// Return `false` unless a recovery mechanism exists to resynchronize
    /// decoding with the packet stream.
    ///
    /// # Returns
    /// `true` to continue with the next packet, `false` to request a stop.
    async fn report_decoding_error(&self, message: &str) -> bool {
        let _ = message;
        false
    }

    /// Does the consumer wish to see log messages of the given importance?
    fn want_log(&self, level: LogLevel) -> bool {
        let _ = level;
        false
    }

    /// Delivers a log message previously gated by [`want_log`](Self::want_log).
    ///
    /// # Returns
    /// `true` to keep receiving, `false` to request a stop.
    fn log_message(&self, level: LogLevel, message: &str) -> bool {
        let _ = (level, message);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingConsumer {
        consumed: AtomicUsize,
    }

    #[async_trait]
    impl PacketConsumer for CountingConsumer {
        async fn consume_buffer(&self, _packet: &[u8]) -> Result<bool, ConsumeError> {
            self.consumed.fetch_add(1, Ordering::Relaxed);
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_default_callbacks() {
        let consumer = CountingConsumer {
            consumed: AtomicUsize::new(0),
        };

        consumer.receiver_started();
        assert!(consumer.consume_buffer(&[1, 2, 3]).await.unwrap());
        assert_eq!(consumer.consumed.load(Ordering::Relaxed), 1);

        assert!(consumer.report_communication_error("transient").await);
        assert!(!consumer.report_decoding_error("bad template").await);
        assert!(!consumer.want_log(LogLevel::Info));
    }
}
