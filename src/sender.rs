// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::{IpAddr, Ipv4Addr, SocketAddrV4};

use pnet::packet::ipv4::Ipv4Packet;
use pnet::transport::TransportSender;
use tracing::{debug, error};

use crate::error::{Result, SendError};
use crate::ip::{self, IP_V4_HDR_LEN};
use crate::udp::{self, UDP_HDR_LEN};

pub const MAX_IP_DATAGRAM_SIZE: usize = 65535;

/// Nominal socket-level target handed to the raw send primitive. Raw
/// socket APIs insist on a destination argument even though routing
/// follows the address inside the IP header, so a fixed loopback
/// placeholder is used. Confirm on the target platform that the kernel
/// does not require the two to match.
const SOCKET_DEST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Reusable scratch space for datagram assembly. Capacity grows by
/// doubling and is kept across calls, so a caller issuing many sends can
/// hold one of these instead of allocating per datagram.
#[derive(Debug, Default)]
pub struct DatagramBuffer {
    buf: Vec<u8>,
}

impl DatagramBuffer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Hands out a zeroed slice of exactly `len` bytes, growing the
    /// allocation if needed. Allocation failure is reported, not
    /// unwound.
    fn prepare(&mut self, len: usize) -> Result<&mut [u8]> {
        self.buf.clear();
        if len > self.buf.capacity() {
            let mut next = self.buf.capacity().max(1);
            while next < len {
                next *= 2;
            }
            self.buf.try_reserve_exact(next)?;
        }
        self.buf.resize(len, 0);
        Ok(&mut self.buf[..])
    }
}

/// Assembles one spoofed-source datagram into `scratch` and returns the
/// wire bytes: a 20-byte IPv4 header, an 8-byte UDP header and the
/// payload, contiguous and in order, every multi-byte field big-endian.
pub fn assemble<'a>(
    scratch: &'a mut DatagramBuffer,
    payload: &[u8],
    src: SocketAddrV4,
    dst: SocketAddrV4,
) -> Result<&'a [u8]> {
    let length = payload.len() + UDP_HDR_LEN + IP_V4_HDR_LEN;
    if length > MAX_IP_DATAGRAM_SIZE {
        return Err(SendError::Oversize { requested: length });
    }

    let datagram = scratch.prepare(length)?;
    ip::write_header(
        &mut datagram[..IP_V4_HDR_LEN],
        *src.ip(),
        *dst.ip(),
        length as u16,
    )?;
    udp::write_header(
        &mut datagram[IP_V4_HDR_LEN..IP_V4_HDR_LEN + UDP_HDR_LEN],
        src.port(),
        dst.port(),
        (payload.len() + UDP_HDR_LEN) as u16,
    )?;
    datagram[IP_V4_HDR_LEN + UDP_HDR_LEN..].copy_from_slice(payload);
    Ok(datagram)
}

/// Builds and transmits a single UDP datagram whose source address and
/// port are taken from `src` rather than assigned by the kernel.
///
/// One best-effort send per call: no retry, no queuing, no session
/// state. `tx` must be a raw IPv4 channel such as the one
/// [`crate::channel::open_raw_channel`] opens; the exclusive borrow
/// keeps concurrent use of one channel out of the picture, while sends
/// over distinct channels are independent. The call blocks for as long
/// as the underlying primitive blocks.
pub fn send_spoofed_udp(
    tx: &mut TransportSender,
    payload: &[u8],
    src: SocketAddrV4,
    dst: SocketAddrV4,
) -> Result<()> {
    let mut scratch = DatagramBuffer::new();
    send_spoofed_udp_buffered(tx, &mut scratch, payload, src, dst)
}

/// As [`send_spoofed_udp`], reusing a caller-held scratch buffer.
pub fn send_spoofed_udp_buffered(
    tx: &mut TransportSender,
    scratch: &mut DatagramBuffer,
    payload: &[u8],
    src: SocketAddrV4,
    dst: SocketAddrV4,
) -> Result<()> {
    let datagram = assemble(scratch, payload, src, dst)?;
    let packet: Ipv4Packet =
        Ipv4Packet::new(datagram).ok_or(SendError::Truncated { header: "IPv4" })?;

    debug!(len = datagram.len(), %src, %dst, "sending spoofed datagram");
    match tx.send_to(packet, SOCKET_DEST) {
        Ok(_) => Ok(()),
        Err(err) => {
            error!(%src, %dst, "raw send failed: {err}");
            Err(SendError::Transmission(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MAX_PAYLOAD: usize = MAX_IP_DATAGRAM_SIZE - IP_V4_HDR_LEN - UDP_HDR_LEN;

    fn src() -> SocketAddrV4 {
        SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 5000)
    }

    fn dst() -> SocketAddrV4 {
        SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 33434)
    }

    #[test]
    fn four_zero_bytes_end_to_end() {
        let mut scratch = DatagramBuffer::new();
        let datagram = assemble(&mut scratch, &[0u8; 4], src(), dst()).unwrap();

        assert_eq!(datagram.len(), 32);

        let header = Ipv4Packet::new(datagram).unwrap();
        assert_eq!(header.get_total_length(), 32);
        assert_eq!(header.get_ttl(), 64);
        assert_eq!(header.get_next_level_protocol().0, 17);
        assert_eq!(&datagram[10..12], &[0xF0, 0xCF]);

        // UDP header: 5000 -> 33434, length 12, checksum disabled.
        assert_eq!(&datagram[20..28], &[0x13, 0x88, 0x82, 0x9A, 0x00, 0x0C, 0x00, 0x00]);
        assert_eq!(&datagram[28..], &[0u8; 4]);
    }

    #[test]
    fn payload_at_the_ipv4_limit_succeeds() {
        let payload = vec![0xABu8; MAX_PAYLOAD];
        let mut scratch = DatagramBuffer::new();
        let datagram = assemble(&mut scratch, &payload, src(), dst()).unwrap();
        assert_eq!(datagram.len(), MAX_IP_DATAGRAM_SIZE);
    }

    #[test]
    fn payload_one_past_the_limit_is_oversize() {
        let payload = vec![0u8; MAX_PAYLOAD + 1];
        let mut scratch = DatagramBuffer::new();
        let err = assemble(&mut scratch, &payload, src(), dst()).unwrap_err();
        assert!(matches!(
            err,
            SendError::Oversize {
                requested: 65536
            }
        ));
    }

    #[test]
    fn assembly_is_idempotent() {
        let mut first = DatagramBuffer::new();
        let mut second = DatagramBuffer::new();
        let payload = b"probe";
        assert_eq!(
            assemble(&mut first, payload, src(), dst()).unwrap(),
            assemble(&mut second, payload, src(), dst()).unwrap()
        );
    }

    #[test]
    fn reused_buffer_does_not_leak_stale_bytes() {
        let mut scratch = DatagramBuffer::new();
        assemble(&mut scratch, &[0xFFu8; 512], src(), dst()).unwrap();

        let datagram = assemble(&mut scratch, &[0x01, 0x02], src(), dst()).unwrap();
        assert_eq!(datagram.len(), 30);
        assert_eq!(&datagram[28..], &[0x01, 0x02]);
    }

    proptest! {
        #[test]
        fn total_length_tracks_the_payload(
            payload in proptest::collection::vec(any::<u8>(), 0..1024),
            src_addr in any::<u32>(),
            src_port in any::<u16>(),
            dst_addr in any::<u32>(),
            dst_port in any::<u16>(),
        ) {
            let src = SocketAddrV4::new(Ipv4Addr::from(src_addr), src_port);
            let dst = SocketAddrV4::new(Ipv4Addr::from(dst_addr), dst_port);

            let mut scratch = DatagramBuffer::new();
            let datagram = assemble(&mut scratch, &payload, src, dst).unwrap();
            prop_assert_eq!(datagram.len(), payload.len() + 28);

            let header = Ipv4Packet::new(datagram).unwrap();
            prop_assert_eq!(usize::from(header.get_total_length()), datagram.len());
            prop_assert_eq!(header.get_source(), *src.ip());
            prop_assert_eq!(header.get_destination(), *dst.ip());

            let udp_len = u16::from_be_bytes([datagram[24], datagram[25]]);
            prop_assert_eq!(usize::from(udp_len), payload.len() + UDP_HDR_LEN);
            prop_assert_eq!(&datagram[20..22], &src.port().to_be_bytes());
            prop_assert_eq!(&datagram[22..24], &dst.port().to_be_bytes());
        }
    }
}
