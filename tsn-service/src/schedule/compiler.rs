/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule compiler: one gate control list per (node, port).
//!
//! Every port receives the same global [`Schedule`].  The updates for a
//! port are emitted in a fixed order below its `gate-parameters` anchor:
//!
//! | # | Leaf | Type | Value |
//! |---|---|---|---|
//! | 1 | `gate-enabled` | bool | `true` |
//! | 2 | `admin-gate-states` | uint | `255` (all gates open) |
//! | 3 | `admin-control-list-length` | uint | number of traffic classes |
//! | 4 | `admin-control-list[index=i]/operation-name` | string | `set-gate-states` |
//! |   | `admin-control-list[index=i]/sgs-params/gate-states-value` | uint | class bitmap |
//! |   | `admin-control-list[index=i]/sgs-params/time-interval-value` | uint | slice in ns |
//! | 5 | `admin-cycle-time/numerator` | int | `trunc(gating_cycle)` |
//! |   | `admin-cycle-time/denominator` | int | `1000` |
//! | 6 | `admin-cycle-time-extension` | uint | `0` |
//! |   | `admin-base-time/seconds` | string | `"0"` |
//! |   | `admin-base-time/fractional-seconds` | string | `"0"` |
//! | 7 | `config-change` | bool | `true` |
//!
//! Updates are addressed to the node name.

use tracing::{debug, info};

use crate::paths;
use crate::tree::{ConfigTree, TreeError};
use crate::update::{TypedValue, Update};

use super::gate::{gate_states_for, interval_ns};
use super::{GateControlEntry, GclConfiguration, PortConfiguration, Schedule, Topology, SET_GATE_STATES};

/// Initial gate states before the list takes over.
const ALL_GATES_OPEN: u64 = 255;

/// Fixed denominator of the cycle time; the numerator is in milliseconds.
const CYCLE_TIME_DENOMINATOR: i64 = 1000;

/// Compiles `schedule` for every port of every node in `topology`, in
/// topology order.
pub fn compile(schedule: &Schedule, topology: &Topology) -> Result<GclConfiguration, TreeError> {
    schedule.check_portions();

    let gate_control_list: Vec<GateControlEntry> = schedule
        .traffic_classes
        .iter()
        .map(|tc| {
            GateControlEntry::set_gate_states(
                gate_states_for(&tc.name),
                interval_ns(schedule.gating_cycle, tc.assigned_portion),
            )
        })
        .collect();

    let mut configs = Vec::with_capacity(topology.port_count());
    for node in &topology.nodes {
        // One document per device; ports of the same node share it.
        let mut tree = ConfigTree::new();
        for port in &node.ports {
            let updates = port_updates(&mut tree, &node.name, &port.name, schedule, &gate_control_list)?;
            debug!(
                node = %node.name,
                port = %port.name,
                updates = updates.len(),
                "Compiled gate control list"
            );
            configs.push(PortConfiguration {
                node: node.name.clone(),
                port: port.name.clone(),
                schedule: schedule.clone(),
                gate_control_list: gate_control_list.clone(),
                updates,
            });
        }
    }

    info!(
        ports = configs.len(),
        traffic_classes = gate_control_list.len(),
        gating_cycle_ms = schedule.gating_cycle,
        "Schedule compiled"
    );
    Ok(GclConfiguration { configs })
}

fn port_updates(
    tree: &mut ConfigTree,
    node: &str,
    port: &str,
    schedule: &Schedule,
    gcl: &[GateControlEntry],
) -> Result<Vec<Update>, TreeError> {
    let mut gate = paths::gate_parameters(tree, port, node)?;
    let mut updates = Vec::with_capacity(9 + 3 * gcl.len());

    updates.push(gate.fork().by_name("gate-enabled")?.set(TypedValue::Bool(true))?);
    updates.push(
        gate.fork()
            .by_name("admin-gate-states")?
            .set(TypedValue::Uint(ALL_GATES_OPEN))?,
    );
    updates.push(
        gate.fork()
            .by_name("admin-control-list-length")?
            .set(TypedValue::Uint(gcl.len() as u64))?,
    );

    for (index, entry) in gcl.iter().enumerate() {
        let mut row = gate
            .fork()
            .by_1_key("", "admin-control-list", "index", &index.to_string())?;
        updates.push(row.fork().by_name("operation-name")?.set(SET_GATE_STATES.into())?);

        let mut sgs = row.by_name("sgs-params")?;
        updates.push(
            sgs.fork()
                .by_name("gate-states-value")?
                .set(TypedValue::Uint(entry.gate_states.into()))?,
        );
        updates.push(
            sgs.by_name("time-interval-value")?
                .set(TypedValue::Uint(entry.duration_ns))?,
        );
    }

    let mut cycle = gate.fork().by_name("admin-cycle-time")?;
    updates.push(
        cycle
            .fork()
            .by_name("numerator")?
            .set(TypedValue::Int(schedule.gating_cycle.trunc() as i64))?,
    );
    updates.push(
        cycle
            .by_name("denominator")?
            .set(TypedValue::Int(CYCLE_TIME_DENOMINATOR))?,
    );

    updates.push(
        gate.fork()
            .by_name("admin-cycle-time-extension")?
            .set(TypedValue::Uint(0))?,
    );
    let mut base_time = gate.fork().by_name("admin-base-time")?;
    updates.push(base_time.fork().by_name("seconds")?.set("0".into())?);
    updates.push(base_time.by_name("fractional-seconds")?.set("0".into())?);

    updates.push(gate.by_name("config-change")?.set(TypedValue::Bool(true))?);
    Ok(updates)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
