//! Demo market-data feed publisher.
//!
//! Publishes presence-mapped datagrams to a multicast group at a steady
//! rate. Each packet is a FAST-style frame: a presence map announcing
//! which of the three quote fields follow, then the raw field bytes.

mod common;

use common::{init_logging, DemoConfig};
use fastwire::prelude::*;
use std::net::Ipv4Addr;
use tokio::net::UdpSocket;
use tokio::time::{interval, Duration};
use tracing::info;

const SYMBOLS: [&str; 4] = ["AAPL", "GOOGL", "MSFT", "AMZN"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cfg = DemoConfig::from_env()?;
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.set_multicast_loop_v4(true)?;

    info!("publishing demo feed to {}:{}", cfg.group, cfg.port);

    let mut seq: u64 = 0;
    let mut ticker = interval(Duration::from_millis(100));
    loop {
        ticker.tick().await;

        let symbol = SYMBOLS[(seq as usize) % SYMBOLS.len()];
        let packet = build_quote(seq, symbol);
        socket.send_to(&packet, (cfg.group, cfg.port)).await?;

        info!(seq, symbol, bytes = packet.len(), "sent quote");
        seq += 1;
    }
}

/// Builds a presence-mapped quote frame.
///
/// Field layout (all optional, gated by the presence map):
/// bit 0 = bid price, bit 1 = ask price, bit 2 = last trade price.
/// Present fields follow the map as 8-byte big-endian scaled prices,
/// after a 4-byte symbol tag.
fn build_quote(seq: u64, symbol: &str) -> Vec<u8> {
    let has_bid = seq % 2 == 0;
    let has_ask = seq % 3 != 0;
    let has_trade = seq % 5 == 0;

    let mut pmap = PresenceMap::new(3);
    pmap.set_next_field(has_bid);
    pmap.set_next_field(has_ask);
    pmap.set_next_field(has_trade);

    let mut packet = Vec::with_capacity(32);
    pmap.encode(&mut packet);

    let mut tag = [b' '; 4];
    tag[..symbol.len().min(4)].copy_from_slice(&symbol.as_bytes()[..symbol.len().min(4)]);
    packet.extend_from_slice(&tag);

    let base = 150_00 + (seq % 100) as u64;
    if has_bid {
        packet.extend_from_slice(&(base - 1).to_be_bytes());
    }
    if has_ask {
        packet.extend_from_slice(&(base + 1).to_be_bytes());
    }
    if has_trade {
        packet.extend_from_slice(&base.to_be_bytes());
    }
    packet
}
