/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Shared anchors and YANG namespaces.
//!
//! Most bridge configuration lives below one of two per-port anchors:
//!
//! ```text
//! /interfaces{ietf-interfaces}/interface[name=<port>]/bridge-port{dot1q-bridge}
//! /interfaces{ietf-interfaces}/interface[name=<port>]/gate-parameters{dot1q-sched}
//! ```

use crate::tree::{ConfigTree, Cursor, TreeError};

pub const IETF_INTERFACES_NS: &str = "urn:ietf:params:xml:ns:yang:ietf-interfaces";
pub const DOT1Q_BRIDGE_NS: &str = "urn:ieee:std:802.1Q:yang:ieee802-dot1q-bridge";
pub const DOT1Q_SCHED_NS: &str = "urn:ieee:std:802.1Q:yang:ieee802-dot1q-sched";
pub const MSTP_NS: &str = "urn:ietf:params:xml:ns:yang:smiv2:ieee8021-mstp";

/// Cursor at `interfaces/interface[name=port]`.
pub fn interface<'t>(tree: &'t mut ConfigTree, port: &str, target: &str) -> Result<Cursor<'t>, TreeError> {
    tree.cursor(target)
        .by_namespace("interfaces", IETF_INTERFACES_NS)?
        .by_1_key("", "interface", "name", port)
}

/// Cursor at the `bridge-port` container of `port`.
pub fn bridge_port<'t>(tree: &'t mut ConfigTree, port: &str, target: &str) -> Result<Cursor<'t>, TreeError> {
    interface(tree, port, target)?.by_namespace("bridge-port", DOT1Q_BRIDGE_NS)
}

/// Cursor at the `gate-parameters` container of `port`.
pub fn gate_parameters<'t>(
    tree: &'t mut ConfigTree,
    port: &str,
    target: &str,
) -> Result<Cursor<'t>, TreeError> {
    interface(tree, port, target)?.by_namespace("gate-parameters", DOT1Q_SCHED_NS)
}
