/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fastwire
//!
//! A FAST (FIX Adapted for STreaming) wire-protocol runtime core for
//! market-data ingestion.
//!
//! FAST is a stop-bit-terminated, template-driven binary encoding that
//! compresses repetitive structured financial records. Fastwire implements
//! the runtime underneath a template decoder: the presence-map codec that
//! signals which fields are on the wire, the byte streaming contracts the
//! codecs consume, and an asynchronous UDP multicast receiver that feeds
//! datagrams to a consumer in arrival order under backpressure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fastwire::prelude::*;
//! use std::net::Ipv4Addr;
//! use std::sync::Arc;
//!
//! let config = ReceiverConfig::new(Ipv4Addr::new(239, 255, 0, 17), 30017);
//! let receiver = MulticastReceiver::start(config, Arc::new(MyConsumer))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: byte streaming contracts and shared types
//! - [`codec`]: the presence-map codec
//! - [`transport`]: buffers, the single-server queue, and the receiver

pub mod core {
    //! Byte streaming contracts and shared types.
    pub use fastwire_core::*;
}

pub mod codec {
    //! FAST presence-map codec.
    pub use fastwire_codec::*;
}

pub mod transport {
    //! Multicast packet transport.
    pub use fastwire_transport::*;
}

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use fastwire_codec::{CodecError, PresenceMap};
    pub use fastwire_core::{ByteSink, ByteSource, LogLevel, SliceByteSource, StreamByteSource};
    pub use fastwire_transport::{
        ConsumeError, MulticastReceiver, PacketConsumer, ReceiverConfig, ReceiverError,
    };
}
