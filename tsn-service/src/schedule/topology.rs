/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Network topology: devices, their ports, and the links between them.
//!
//! Links name their endpoints as `"<device>.<port>"`.  Link entries are kept
//! in their raw string form ([`RawLink`]) until a [`Topology`] is built;
//! entries that do not parse are dropped with a warning.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
}

/// A device (end node or bridge) and its ports in topology order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub ports: Vec<Port>,
}

impl Node {
    pub fn new<I, S>(name: impl Into<String>, ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ports: ports.into_iter().map(|p| Port { name: p.into() }).collect(),
        }
    }
}

// ── Links ─────────────────────────────────────────────────────────────────────

/// `"<device>.<port>"` split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortRef {
    pub device: String,
    pub port: String,
}

impl PortRef {
    /// Splits at the first `.`; `None` if either half is empty.
    pub fn parse(s: &str) -> Option<Self> {
        let (device, port) = s.split_once('.')?;
        if device.is_empty() || port.is_empty() {
            return None;
        }
        Some(Self {
            device: device.to_string(),
            port: port.to_string(),
        })
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.device, self.port)
    }
}

/// A link as stored and as written in topology files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLink {
    pub source_port: String,
    pub target_port: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub source: PortRef,
    pub target: PortRef,
}

impl Link {
    pub fn parse(raw: &RawLink) -> Option<Self> {
        Some(Self {
            source: PortRef::parse(&raw.source_port)?,
            target: PortRef::parse(&raw.target_port)?,
        })
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Topology {
    /// Builds a topology, skipping links whose endpoints do not parse.
    pub fn new(nodes: Vec<Node>, raw_links: impl IntoIterator<Item = RawLink>) -> Self {
        let links = raw_links
            .into_iter()
            .filter_map(|raw| {
                let link = Link::parse(&raw);
                if link.is_none() {
                    warn!(
                        source_port = %raw.source_port,
                        target_port = %raw.target_port,
                        "Skipping malformed link"
                    );
                }
                link
            })
            .collect();
        Self { nodes, links }
    }

    /// Total number of ports over all nodes.
    pub fn port_count(&self) -> usize {
        self.nodes.iter().map(|n| n.ports.len()).sum()
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }
}
