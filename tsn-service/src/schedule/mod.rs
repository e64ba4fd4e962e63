/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Bandwidth schedules and the gate control lists compiled from them.
//!
//! ```text
//! Schedule ─┐
//!           ├──(compiler::compile)──►  GclConfiguration
//! Topology ─┘                            └─ PortConfiguration per (node, port)
//!                                             ├─ GateControlEntry per traffic class
//!                                             └─ Update list (gate-parameters)
//! ```
//!
//! A [`Schedule`] is a list of traffic classes, each with the share of the
//! gating cycle it may transmit in.  Shares are meant to add up to 100 %;
//! other totals are accepted and reported as a warning.

pub mod compiler;
pub mod gate;
pub mod topology;

pub use compiler::compile;
pub use gate::{interval_ns, TrafficClassKind};
pub use topology::{Link, Node, Port, PortRef, RawLink, Topology};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::update::Update;

/// Operation name carried by every gate control list entry.
pub const SET_GATE_STATES: &str = "set-gate-states";

// ── Schedule ──────────────────────────────────────────────────────────────────

/// One traffic class and its share of the gating cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficClass {
    pub name: String,
    /// Percentage of the gating cycle, nominally 0..=100.
    pub assigned_portion: u32,
}

impl TrafficClass {
    pub fn new(name: impl Into<String>, assigned_portion: u32) -> Self {
        Self {
            name: name.into(),
            assigned_portion,
        }
    }
}

/// Traffic classes in transmission order plus the gating cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub traffic_classes: Vec<TrafficClass>,
    /// Gating cycle in milliseconds.
    pub gating_cycle: f64,
}

impl Schedule {
    /// Sum of all assigned portions.
    pub fn total_portion(&self) -> u32 {
        self.traffic_classes.iter().map(|tc| tc.assigned_portion).sum()
    }

    /// `true` when the portions add up to exactly 100.  Logs a warning
    /// otherwise; the schedule is still usable.
    pub fn check_portions(&self) -> bool {
        let total = self.total_portion();
        if total != 100 {
            warn!(
                total,
                classes = self.traffic_classes.len(),
                "Assigned portions do not add up to 100%"
            );
            return false;
        }
        true
    }
}

// ── Compiled output ───────────────────────────────────────────────────────────

/// One row of a gate control list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateControlEntry {
    pub operation: String,
    pub gate_states: u8,
    pub duration_ns: u64,
}

impl GateControlEntry {
    pub fn set_gate_states(gate_states: u8, duration_ns: u64) -> Self {
        Self {
            operation: SET_GATE_STATES.to_string(),
            gate_states,
            duration_ns,
        }
    }
}

/// Everything compiled for one port of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortConfiguration {
    pub node: String,
    pub port: String,
    pub schedule: Schedule,
    pub gate_control_list: Vec<GateControlEntry>,
    /// Updates in the order they must be applied to the device.
    pub updates: Vec<Update>,
}

impl PortConfiguration {
    /// `"<node>.<port>"`, the same form topology links use.
    pub fn node_port(&self) -> String {
        format!("{}.{}", self.node, self.port)
    }
}

/// The compiled result for a whole topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GclConfiguration {
    pub configs: Vec<PortConfiguration>,
}

impl GclConfiguration {
    pub fn port(&self, node: &str, port: &str) -> Option<&PortConfiguration> {
        self.configs.iter().find(|c| c.node == node && c.port == port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
