/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! PCP encoding and decoding tables (IEEE 802.1Q-2018 6.9.3, table 6-3).
//!
//! A PCP type names how the eight priorities share the 3-bit PCP field with
//! the drop-eligible indicator: `8P0D` has eight priorities and no
//! drop-eligible ones, `5P3D` has five priorities and three drop-eligible.
//!
//! ```text
//! bridge-port/pcp-encoding-table[pcp=<type>]/priority-map[priority=<p>][dei=<d>]/priority-code-point
//! bridge-port/pcp-decoding-table[pcp=<type>]/priority-map[priority-code-point=<pcp>]/{priority,dei}
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::ConfigError;
use crate::paths;
use crate::tree::ConfigTree;
use crate::update::{TypedValue, Update};

use super::MAX_PRIORITY;

// ── PcpType ───────────────────────────────────────────────────────────────────

/// PCP type, i.e. the split between priorities and drop-eligible codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcpType {
    Pcp8P0D,
    Pcp7P1D,
    Pcp6P2D,
    Pcp5P3D,
}

const VALID_PCP_TYPES: &str = "8P0D, 7P1D, 6P2D, 5P3D";

impl PcpType {
    /// All types in the order the default tables are written.
    pub const ALL: [PcpType; 4] = [
        PcpType::Pcp8P0D,
        PcpType::Pcp7P1D,
        PcpType::Pcp6P2D,
        PcpType::Pcp5P3D,
    ];

    /// YANG literal of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            PcpType::Pcp8P0D => "8P0D",
            PcpType::Pcp7P1D => "7P1D",
            PcpType::Pcp6P2D => "6P2D",
            PcpType::Pcp5P3D => "5P3D",
        }
    }

    /// PCP per priority, for `dei = false` and `dei = true`.
    fn encoding_rows(self) -> (&'static [u8; 8], &'static [u8; 8]) {
        match self {
            PcpType::Pcp8P0D => (&[0, 1, 2, 3, 4, 5, 6, 7], &[0, 1, 2, 3, 4, 5, 6, 7]),
            PcpType::Pcp7P1D => (&[0, 1, 2, 3, 5, 5, 6, 7], &[0, 1, 2, 3, 4, 4, 6, 7]),
            PcpType::Pcp6P2D => (&[0, 1, 3, 3, 5, 5, 6, 7], &[0, 1, 2, 2, 4, 4, 6, 7]),
            PcpType::Pcp5P3D => (&[1, 1, 3, 3, 5, 5, 6, 7], &[0, 0, 2, 2, 4, 4, 6, 7]),
        }
    }

    /// Priority and drop-eligible flag per PCP.
    fn decoding_rows(self) -> (&'static [u8; 8], &'static [bool; 8]) {
        const F: bool = false;
        const T: bool = true;
        match self {
            PcpType::Pcp8P0D => (&[0, 1, 2, 3, 4, 5, 6, 7], &[F, F, F, F, F, F, F, F]),
            PcpType::Pcp7P1D => (&[0, 1, 2, 3, 4, 4, 6, 7], &[F, F, F, F, T, F, F, F]),
            PcpType::Pcp6P2D => (&[0, 1, 2, 2, 4, 4, 6, 7], &[F, F, T, F, T, F, F, F]),
            PcpType::Pcp5P3D => (&[0, 0, 2, 2, 4, 4, 6, 7], &[T, F, T, F, T, F, F, F]),
        }
    }
}

impl fmt::Display for PcpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PcpType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PcpType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownEnumValue {
                what: "PCP type",
                value: s.to_string(),
                valid: VALID_PCP_TYPES,
            })
    }
}

// ── Lookups ───────────────────────────────────────────────────────────────────

/// PCP to transmit for `priority` with drop eligibility `dei`.
pub fn encode(pcp_type: PcpType, priority: u8, dei: bool) -> Result<u8, ConfigError> {
    if priority > MAX_PRIORITY {
        return Err(ConfigError::out_of_range("priority", priority, 0, MAX_PRIORITY.into()));
    }
    let (keep, drop) = pcp_type.encoding_rows();
    let row = if dei { drop } else { keep };
    Ok(row[usize::from(priority)])
}

/// Priority and drop eligibility carried by a received `pcp`.
pub fn decode(pcp_type: PcpType, pcp: u8) -> Result<(u8, bool), ConfigError> {
    if pcp > MAX_PRIORITY {
        return Err(ConfigError::out_of_range("PCP", pcp, 0, MAX_PRIORITY.into()));
    }
    let (priorities, deis) = pcp_type.decoding_rows();
    let i = usize::from(pcp);
    Ok((priorities[i], deis[i]))
}

// ── Tree writers ──────────────────────────────────────────────────────────────

/// Writes one encoding entry and returns its update.
pub fn set_pcp_encoding_value(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
    pcp_type: PcpType,
    priority: u8,
    dei: bool,
) -> Result<Update, ConfigError> {
    let pcp = encode(pcp_type, priority, dei)?;
    let update = paths::bridge_port(tree, port, target)?
        .by_1_key("", "pcp-encoding-table", "pcp", pcp_type.as_str())?
        .by_2_keys(
            "",
            "priority-map",
            "priority",
            &priority.to_string(),
            "dei",
            &dei.to_string(),
        )?
        .by_name("priority-code-point")?
        .set(TypedValue::Uint(pcp.into()))?;
    Ok(update)
}

/// Writes one decoding entry (`priority` then `dei`) and returns both
/// updates.
pub fn set_pcp_decoding_value(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
    pcp_type: PcpType,
    pcp: u8,
) -> Result<[Update; 2], ConfigError> {
    let (priority, dei) = decode(pcp_type, pcp)?;
    let mut entry = paths::bridge_port(tree, port, target)?
        .by_1_key("", "pcp-decoding-table", "pcp", pcp_type.as_str())?
        .by_1_key("", "priority-map", "priority-code-point", &pcp.to_string())?;

    let priority_update = entry
        .fork()
        .by_name("priority")?
        .set(TypedValue::Uint(priority.into()))?;
    let dei_update = entry.by_name("dei")?.set(TypedValue::Bool(dei))?;
    Ok([priority_update, dei_update])
}

/// Full default encoding table for `port`: every type, every priority,
/// `dei = false` before `dei = true`.  64 updates.
pub fn set_default_pcp_encoding_table(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
) -> Result<Vec<Update>, ConfigError> {
    let mut updates = Vec::with_capacity(PcpType::ALL.len() * 16);
    for pcp_type in PcpType::ALL {
        for priority in 0..=MAX_PRIORITY {
            for dei in [false, true] {
                updates.push(set_pcp_encoding_value(tree, port, target, pcp_type, priority, dei)?);
            }
        }
    }
    debug!(port, target, updates = updates.len(), "PCP encoding table written");
    Ok(updates)
}

/// Full default decoding table for `port`: every type, every PCP.
/// 64 updates.
pub fn set_default_pcp_decoding_table(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
) -> Result<Vec<Update>, ConfigError> {
    let mut updates = Vec::with_capacity(PcpType::ALL.len() * 16);
    for pcp_type in PcpType::ALL {
        for pcp in 0..=MAX_PRIORITY {
            updates.extend(set_pcp_decoding_value(tree, port, target, pcp_type, pcp)?);
        }
    }
    debug!(port, target, updates = updates.len(), "PCP decoding table written");
    Ok(updates)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
