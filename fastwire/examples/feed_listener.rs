//! Demo market-data feed listener.
//!
//! Joins the demo multicast group, decodes the leading presence map of
//! every datagram, and logs which quote fields each frame carries.

mod common;

use async_trait::async_trait;
use common::{init_logging, DemoConfig};
use fastwire::prelude::*;
use std::sync::Arc;
use tracing::{info, warn};

struct FeedConsumer;

#[async_trait]
impl PacketConsumer for FeedConsumer {
    fn receiver_started(&self) {
        info!("listener ready");
    }

    async fn consume_buffer(&self, packet: &[u8]) -> Result<bool, ConsumeError> {
        let mut source = SliceByteSource::new(packet);
        let mut pmap = PresenceMap::new(3);
        pmap.decode(&mut source)?;

        let has_bid = pmap.check_next_field();
        let has_ask = pmap.check_next_field();
        let has_trade = pmap.check_next_field();
        info!(
            has_bid,
            has_ask,
            has_trade,
            payload = source.remaining(),
            "quote frame"
        );
        Ok(true)
    }

    async fn report_communication_error(&self, message: &str) -> bool {
        warn!(%message, "communication error, continuing");
        true
    }

    async fn report_decoding_error(&self, message: &str) -> bool {
        warn!(%message, "decoding error, continuing");
        true
    }

    fn want_log(&self, level: LogLevel) -> bool {
        level <= LogLevel::Info
    }

    fn log_message(&self, level: LogLevel, message: &str) -> bool {
        info!(%level, message, "receiver");
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cfg = DemoConfig::from_env()?;
    let config = ReceiverConfig::new(cfg.group, cfg.port)
        .with_listen_interface(cfg.interface)
        .with_buffer_count(4);
    let receiver = MulticastReceiver::start(config, Arc::new(FeedConsumer))?;

    tokio::signal::ctrl_c().await?;
    receiver.stop();

    info!(
        packets_received = receiver.packets_received(),
        packets_processed = receiver.packets_processed(),
        bytes_processed = receiver.bytes_processed(),
        largest_packet = receiver.largest_packet(),
        no_buffer_available = receiver.no_buffer_available(),
        "listener stopped"
    );
    Ok(())
}
