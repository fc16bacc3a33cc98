/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Receiver error types.

use std::net::Ipv4Addr;
use thiserror::Error;

/// Errors raised while configuring or starting a receiver.
///
/// Runtime receive failures are not errors at this level: they are counted
/// and routed to the consumer's `report_communication_error` callback,
/// which decides whether ingestion continues.
#[derive(Debug, Error)]
pub enum ReceiverError {
    /// Socket setup failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured group address is not an IPv4 multicast address.
    #[error("not a multicast group address: {0}")]
    NotMulticast(Ipv4Addr),

    /// The configured receive buffer size cannot hold a datagram.
    #[error("buffer size must be at least 1 byte, got {0}")]
    InvalidBufferSize(usize),

    /// The receiver needs at least one buffer to post a receive.
    #[error("buffer count must be at least 1, got {0}")]
    InvalidBufferCount(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_error_display() {
        let err = ReceiverError::NotMulticast(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(err.to_string(), "not a multicast group address: 10.0.0.1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken");
        let err: ReceiverError = io.into();
        assert!(matches!(err, ReceiverError::Io(_)));
    }
}
