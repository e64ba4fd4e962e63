/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Gate states and time intervals of a gate control list entry.

use tracing::warn;

/// Traffic class names with a fixed gate-state bitmap.
///
/// Names outside this set map to [`TrafficClassKind::Unknown`], whose gate
/// states are `0` (all gates closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficClassKind {
    Isochronous,
    CyclicSync,
    CyclicAsync,
    AlarmsEvents,
    ConfigDiag,
    NetworkControl,
    BestEffort,
    Unknown,
}

impl TrafficClassKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "isochronous" => TrafficClassKind::Isochronous,
            "cyclic-sync" => TrafficClassKind::CyclicSync,
            "cyclic-async" => TrafficClassKind::CyclicAsync,
            "alarms-events" => TrafficClassKind::AlarmsEvents,
            "config-diag" => TrafficClassKind::ConfigDiag,
            "network-control" => TrafficClassKind::NetworkControl,
            "best-effort" => TrafficClassKind::BestEffort,
            _ => TrafficClassKind::Unknown,
        }
    }

    /// Bitmap of open gates while this class transmits.
    pub fn gate_states(self) -> u8 {
        match self {
            TrafficClassKind::Isochronous => 128,
            TrafficClassKind::CyclicSync => 64,
            TrafficClassKind::CyclicAsync => 32,
            TrafficClassKind::AlarmsEvents => 16,
            TrafficClassKind::ConfigDiag => 8,
            TrafficClassKind::NetworkControl => 4,
            TrafficClassKind::BestEffort => 3,
            TrafficClassKind::Unknown => 0,
        }
    }
}

/// Gate states for the class called `name`; `0` with a warning when the
/// name is not recognised.
pub fn gate_states_for(name: &str) -> u8 {
    let kind = TrafficClassKind::from_name(name);
    if kind == TrafficClassKind::Unknown {
        warn!(traffic_class = name, "Unknown traffic class, all gates closed");
    }
    kind.gate_states()
}

/// Length in nanoseconds of a `portion` % slice of a `gating_cycle_ms`
/// cycle, truncated towards zero.
///
/// The cycle is snapped to whole nanoseconds first so that decimal cycles
/// such as `2.01` ms divide exactly.
pub fn interval_ns(gating_cycle_ms: f64, portion: u32) -> u64 {
    let cycle_ns = (gating_cycle_ms * 1_000_000.0).round() as u64;
    cycle_ns * u64::from(portion) / 100
}
