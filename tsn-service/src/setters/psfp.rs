/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-stream filtering and policing (802.1Qci) and stream identification
//! (802.1CB) leaves below the bridge port.
//!
//! ```text
//! bridge-port/stream-filter-instance-table/filter-specification-table[flow-meter-instence-identifier=<id>]/max-sdu-size
//! bridge-port/stream-filter-instance-table/stream-blocked-due-to-oversize-frame-enabled
//! bridge-port/stream-identification/stream-handles[stream-handle=<h>]/source-mac-identification-entry/{source-mac,tagged,vlan}
//! ```
//!
//! `flow-meter-instence-identifier` is spelled as the device model spells it.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::paths;
use crate::tree::ConfigTree;
use crate::update::{TypedValue, Update};

const FILTER_TABLE: &str = "stream-filter-instance-table";

// ── Stream filter ─────────────────────────────────────────────────────────────

/// Writes one filter specification per `(max_sdu_size, flow_id)` pair.
///
/// The two slices are consumed pairwise and must have the same length.
pub fn set_filter_specifications(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
    max_sdu_sizes: &[u32],
    flow_ids: &[u32],
) -> Result<Vec<Update>, ConfigError> {
    if max_sdu_sizes.len() != flow_ids.len() {
        return Err(ConfigError::InconsistentInput {
            left: "max SDU sizes",
            left_len: max_sdu_sizes.len(),
            right: "flow meter ids",
            right_len: flow_ids.len(),
        });
    }

    let mut filter = paths::bridge_port(tree, port, target)?.by_name(FILTER_TABLE)?;
    let mut updates = Vec::with_capacity(flow_ids.len());
    for (&max_sdu, &flow_id) in max_sdu_sizes.iter().zip(flow_ids) {
        let update = filter
            .fork()
            .by_1_key(
                "",
                "filter-specification-table",
                "flow-meter-instence-identifier",
                &flow_id.to_string(),
            )?
            .by_name("max-sdu-size")?
            .set(TypedValue::Uint(max_sdu.into()))?;
        updates.push(update);
    }
    Ok(updates)
}

pub fn set_stream_blocked_due_to_oversize_frame_enabled(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
    enabled: bool,
) -> Result<Update, ConfigError> {
    let update = paths::bridge_port(tree, port, target)?
        .by_name(FILTER_TABLE)?
        .by_name("stream-blocked-due-to-oversize-frame-enabled")?
        .set(TypedValue::Bool(enabled))?;
    Ok(update)
}

// ── Stream identification ─────────────────────────────────────────────────────

/// To which extent the VLAN tag takes part in stream identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tagged {
    Tagged,
    Priority,
    #[default]
    All,
}

impl Tagged {
    pub fn as_str(self) -> &'static str {
        match self {
            Tagged::Tagged => "tagged",
            Tagged::Priority => "priority",
            Tagged::All => "all",
        }
    }
}

impl fmt::Display for Tagged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tagged {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tagged" => Ok(Tagged::Tagged),
            "priority" => Ok(Tagged::Priority),
            "all" => Ok(Tagged::All),
            other => Err(ConfigError::UnknownEnumValue {
                what: "tagged mode",
                value: other.to_string(),
                valid: "tagged, priority, all",
            }),
        }
    }
}

/// Source MAC based identification of one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMacIdentification {
    pub source_mac: String,
    pub tagged: Tagged,
    pub vlan: u16,
}

/// Writes `source-mac`, `tagged` and `vlan` for stream handle `handle`.
pub fn set_source_mac_identification(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
    handle: &str,
    entry: &SourceMacIdentification,
) -> Result<Vec<Update>, ConfigError> {
    let mut anchor = paths::bridge_port(tree, port, target)?
        .by_name("stream-identification")?
        .by_1_key("", "stream-handles", "stream-handle", handle)?
        .by_name("source-mac-identification-entry")?;

    let leaves = [
        ("source-mac", TypedValue::from(entry.source_mac.as_str())),
        ("tagged", TypedValue::from(entry.tagged.as_str())),
        ("vlan", TypedValue::Uint(entry.vlan.into())),
    ];
    let mut updates = Vec::with_capacity(leaves.len());
    for (leaf, value) in leaves {
        updates.push(anchor.fork().by_name(leaf)?.set(value)?);
    }
    Ok(updates)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_specifications_are_keyed_by_flow_id() {
        let mut tree = ConfigTree::new();
        let updates =
            set_filter_specifications(&mut tree, "p1", "t", &[1500, 256], &[7, 8]).unwrap();

        assert_eq!(updates.len(), 2);
        let entry = &updates[1].path.segments()[4];
        assert_eq!(entry.name(), "filter-specification-table");
        assert_eq!(entry.key("flow-meter-instence-identifier"), Some("8"));
        assert_eq!(updates[1].value, TypedValue::Uint(256));
    }

    #[test]
    fn mismatched_lists_are_inconsistent() {
        let mut tree = ConfigTree::new();
        let err = set_filter_specifications(&mut tree, "p1", "t", &[1500], &[7, 8]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InconsistentInput {
                left: "max SDU sizes",
                left_len: 1,
                right: "flow meter ids",
                right_len: 2,
            }
        );
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn oversize_flag_shares_the_filter_container() {
        let mut tree = ConfigTree::new();
        let spec = set_filter_specifications(&mut tree, "p1", "t", &[1500], &[1]).unwrap();
        let flag = set_stream_blocked_due_to_oversize_frame_enabled(&mut tree, "p1", "t", true).unwrap();

        assert_eq!(spec[0].path.segments()[3], flag.path.segments()[3]);
        assert_eq!(flag.value, TypedValue::Bool(true));
    }

    #[test]
    fn source_mac_entry_writes_three_leaves() {
        let mut tree = ConfigTree::new();
        let entry = SourceMacIdentification {
            source_mac: "00-1B-21-00-00-01".into(),
            tagged: "priority".parse().unwrap(),
            vlan: 100,
        };
        let updates = set_source_mac_identification(&mut tree, "p1", "t", "42", &entry).unwrap();

        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].path.segments()[4].key("stream-handle"), Some("42"));
        assert_eq!(updates[1].value, TypedValue::from("priority"));
        assert_eq!(updates[2].value, TypedValue::Uint(100));
    }

    #[test]
    fn unknown_tagged_mode_is_rejected() {
        assert!(matches!(
            "untagged".parse::<Tagged>(),
            Err(ConfigError::UnknownEnumValue { .. })
        ));
        assert_eq!(Tagged::default(), Tagged::All);
    }
}
