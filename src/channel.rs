// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::transport::{self, TransportChannelType, TransportSender};

const TRANSPORT_BUFFER_SIZE: usize = 4096;
// Protocol 255 (IPPROTO_RAW): the kernel performs no inbound
// demultiplexing for it, so the channel is effectively send-only.
const CHANNEL_TYPE_RAW: TransportChannelType =
    TransportChannelType::Layer3(IpNextHeaderProtocols::Reserved);

/// Opens the raw IPv4 capability that [`crate::sender::send_spoofed_udp`]
/// transmits through. Layer-3 channels carry caller-built IP headers
/// verbatim. Creating one needs elevated privileges on most platforms
/// (root or CAP_NET_RAW on Linux); the failure surfaces here, before any
/// datagram is built.
pub fn open_raw_channel() -> anyhow::Result<TransportSender> {
    let (tx, _rx) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_RAW)
        .context("opening raw IPv4 channel")?;
    Ok(tx)
}
