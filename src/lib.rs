// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Builds and transmits single IPv4/UDP datagrams whose source address
//! and port are chosen by the caller instead of the kernel, for
//! diagnostic tools that need to emulate a particular sender.
//!
//! The crate is a library primitive: one synchronous best-effort send
//! per call, no configuration, no reply handling. The UDP checksum is
//! deliberately left at zero (valid over IPv4); the IP header checksum
//! uses the XOR folding described in [`checksum::header_checksum`].
//!
//! ```no_run
//! let mut tx = rawsend::channel::open_raw_channel()?;
//! rawsend::send_spoofed_udp(
//!     &mut tx,
//!     b"probe",
//!     "10.0.0.1:5000".parse()?,
//!     "8.8.8.8:33434".parse()?,
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod channel;
pub mod checksum;
pub mod error;
pub mod ip;
pub mod sender;
pub mod udp;

pub use error::{Result, SendError};
pub use sender::{
    DatagramBuffer, MAX_IP_DATAGRAM_SIZE, assemble, send_spoofed_udp, send_spoofed_udp_buffered,
};
