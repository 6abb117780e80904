// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte-order policy.
//!
//! One explicit value per generation run, threaded through the emitter and
//! the interpretive decoder. Never a process-wide global: one process can
//! run little- and big-endian generations back to back.

use serde::{Deserialize, Serialize};

/// Mapping from byte position to numeric significance within a multi-byte
/// primitive. One-byte reads are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// First byte read is least significant.
    #[default]
    Little,
    /// First byte read is most significant.
    Big,
}

impl ByteOrder {
    /// Parse a selector as it appears on the command line or in config.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "little" | "le" => Some(Self::Little),
            "big" | "be" => Some(Self::Big),
            _ => None,
        }
    }

    /// Combine `bytes` into an unsigned integer under this order.
    /// `bytes` is exactly one primitive width; callers bounds-check
    /// before slicing.
    pub fn read_uint(self, bytes: &[u8]) -> u64 {
        let fold = |acc: u64, b: &u8| (acc << 8) | u64::from(*b);
        match self {
            Self::Little => bytes.iter().rev().fold(0, fold),
            Self::Big => bytes.iter().fold(0, fold),
        }
    }
}
