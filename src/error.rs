// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::collections::TryReserveError;
use std::io;

/// Failures a single spoofed-UDP send can report. Every failure is
/// surfaced synchronously to the caller; nothing in this crate retries
/// or aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("datagram of {requested} bytes exceeds the 65535-byte IPv4 limit")]
    Oversize { requested: usize },

    #[error("scratch buffer allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("{header} header did not fit its slice")]
    Truncated { header: &'static str },

    #[error("raw transmission failed: {0}")]
    Transmission(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SendError>;
