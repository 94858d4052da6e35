// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::Ipv4Addr;

use pnet::packet::Packet;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::{Ipv4Packet, MutableIpv4Packet};

use crate::checksum;
use crate::error::{Result, SendError};

pub const IP_V4_HDR_LEN: usize = 20;
pub const DEFAULT_TTL: u8 = 64;
const WORD_LEN: usize = 4;

/// Fills `buf` with a 20-byte IPv4 header carrying a UDP payload and
/// installs the header checksum. `total_len` is the full on-wire
/// datagram length, headers included. The identification field stays
/// zero on every call; nothing here tracks fragmentation.
pub fn write_header(
    buf: &mut [u8],
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
    total_len: u16,
) -> Result<()> {
    let mut ipv4: MutableIpv4Packet =
        MutableIpv4Packet::new(buf).ok_or(SendError::Truncated { header: "IPv4" })?;
    ipv4.set_version(4);
    ipv4.set_header_length((IP_V4_HDR_LEN / WORD_LEN) as u8);
    ipv4.set_dscp(0);
    ipv4.set_ecn(0);
    ipv4.set_total_length(total_len);
    ipv4.set_identification(0);
    ipv4.set_flags(0);
    ipv4.set_fragment_offset(0);
    ipv4.set_ttl(DEFAULT_TTL);
    ipv4.set_next_level_protocol(IpNextHeaderProtocols::Udp);
    ipv4.set_source(src_addr);
    ipv4.set_destination(dst_addr);
    ipv4.set_checksum(0);

    let ipv4_imm: Ipv4Packet = ipv4.to_immutable();
    let csum = checksum::header_checksum(ipv4_imm.packet());
    ipv4.set_checksum(csum);
    Ok(())
}
