// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use pnet::packet::udp::MutableUdpPacket;

use crate::error::{Result, SendError};

pub const UDP_HDR_LEN: usize = 8;

/// Fills `buf` with an 8-byte UDP header. `udp_len` covers the header
/// plus the payload that will follow it on the wire. The checksum stays
/// zero, which IPv4 permits as "not computed".
pub fn write_header(buf: &mut [u8], src_port: u16, dst_port: u16, udp_len: u16) -> Result<()> {
    let mut udp: MutableUdpPacket =
        MutableUdpPacket::new(buf).ok_or(SendError::Truncated { header: "UDP" })?;
    udp.set_source(src_port);
    udp.set_destination(dst_port);
    udp.set_length(udp_len);
    udp.set_checksum(0);
    Ok(())
}
