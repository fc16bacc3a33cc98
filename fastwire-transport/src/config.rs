/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Receiver configuration.

use crate::error::ReceiverError;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddrV4};

/// Default receive buffer size: a standard MTU plus overhead.
pub const DEFAULT_BUFFER_SIZE: usize = 1600;

/// Default buffer count: one in flight with the kernel, one being serviced.
pub const DEFAULT_BUFFER_COUNT: usize = 2;

/// Configuration for a [`MulticastReceiver`](crate::MulticastReceiver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// IPv4 multicast group to join.
    pub multicast_group: Ipv4Addr,
    /// Network interface to listen and join on; `0.0.0.0` lets the OS
    /// choose.
    pub listen_interface: Ipv4Addr,
    /// UDP port number.
    pub port: u16,
    /// Maximum datagram size, in bytes.
    pub buffer_size: usize,
    /// Number of receive buffers to allocate.
    pub buffer_count: usize,
}

impl ReceiverConfig {
    /// Creates a configuration for the required group and port, with every
    /// other field defaulted.
    #[must_use]
    pub fn new(multicast_group: Ipv4Addr, port: u16) -> Self {
        Self {
            multicast_group,
            listen_interface: Ipv4Addr::UNSPECIFIED,
            port,
            buffer_size: DEFAULT_BUFFER_SIZE,
            buffer_count: DEFAULT_BUFFER_COUNT,
        }
    }

    /// Sets the listen interface.
    #[must_use]
    pub const fn with_listen_interface(mut self, interface: Ipv4Addr) -> Self {
        self.listen_interface = interface;
        self
    }

    /// Sets the maximum datagram size.
    #[must_use]
    pub const fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the number of receive buffers.
    ///
    /// Too few buffers shows up as a rising `no_buffer_available` counter
    /// while the consumer is busy.
    #[must_use]
    pub const fn with_buffer_count(mut self, count: usize) -> Self {
        self.buffer_count = count;
        self
    }

    /// The local address the receiver binds to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.listen_interface, self.port)
    }

    /// Checks the configuration against the receiver's requirements.
    ///
    /// # Errors
    /// Returns the first violated constraint: a non-multicast group
    /// address, a zero buffer size, or a zero buffer count.
    pub fn validate(&self) -> Result<(), ReceiverError> {
        if !self.multicast_group.is_multicast() {
            return Err(ReceiverError::NotMulticast(self.multicast_group));
        }
        if self.buffer_size == 0 {
            return Err(ReceiverError::InvalidBufferSize(self.buffer_size));
        }
        if self.buffer_count == 0 {
            return Err(ReceiverError::InvalidBufferCount(self.buffer_count));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ReceiverConfig::new(Ipv4Addr::new(239, 255, 0, 1), 30001);
        assert_eq!(config.listen_interface, Ipv4Addr::UNSPECIFIED);
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(config.buffer_count, DEFAULT_BUFFER_COUNT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ReceiverConfig::new(Ipv4Addr::new(239, 1, 2, 3), 9000)
            .with_listen_interface(Ipv4Addr::new(192, 168, 1, 10))
            .with_buffer_size(9000)
            .with_buffer_count(8);

        assert_eq!(config.bind_addr().port(), 9000);
        assert_eq!(config.bind_addr().ip(), &Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(config.buffer_size, 9000);
        assert_eq!(config.buffer_count, 8);
    }

    #[test]
    fn test_config_rejects_unicast_group() {
        let config = ReceiverConfig::new(Ipv4Addr::new(10, 0, 0, 1), 9000);
        assert!(matches!(
            config.validate(),
            Err(ReceiverError::NotMulticast(_))
        ));
    }

    #[test]
    fn test_config_rejects_zero_buffers() {
        let base = ReceiverConfig::new(Ipv4Addr::new(239, 255, 0, 1), 9000);

        assert!(matches!(
            base.clone().with_buffer_size(0).validate(),
            Err(ReceiverError::InvalidBufferSize(0))
        ));
        assert!(matches!(
            base.with_buffer_count(0).validate(),
            Err(ReceiverError::InvalidBufferCount(0))
        ));
    }
}
