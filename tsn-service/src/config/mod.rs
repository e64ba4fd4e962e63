//! Service configuration and YAML input files.
//!
//! Three files feed the service:
//!
//! ```yaml
//! # service configuration (optional, every key optional)
//! notification_port: 5150
//! event_port: 5151
//! schedule_file: configs/schedules/default-schedule.yaml
//! topology_file: configs/topology.yaml
//! ```
//!
//! ```yaml
//! # schedule
//! trafficClasses:
//!   - name: network-control
//!     assignedPortion: 30
//!   - name: best-effort
//!     assignedPortion: 70
//! gatingCycle: 1.0        # milliseconds
//! ```
//!
//! ```yaml
//! # topology
//! nodes:
//!   - name: es1
//!     type: end-node      # or "bridge" (default)
//!     ports: [{ name: eth0 }]
//!   - name: sw1
//!     ports: [{ name: p1 }, { name: p2 }]
//! links:
//!   - sourcePort: es1.eth0
//!     targetPort: sw1.p1
//! ```
//!
//! Command-line flags take precedence over the service configuration file,
//! which takes precedence over the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::schedule::{Node, Port, RawLink, Schedule};
use crate::store::{ConfigStore, NodeKind};

pub const DEFAULT_NOTIFICATION_PORT: u16 = 5150;
pub const DEFAULT_EVENT_PORT: u16 = 5151;
pub const DEFAULT_SCHEDULE_FILE: &str = "configs/schedules/default-schedule.yaml";

// ── ServiceConfig ─────────────────────────────────────────────────────────────

/// Ports and input files of the running service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// `tsn.Notification` (CalcConfig / GetConfiguration).
    pub notification_port: u16,
    /// `tsn.NotificationService` (ConfigNotification).
    pub event_port: u16,
    pub schedule_file: PathBuf,
    /// Topology used to seed the store.  Without one the topology is empty.
    pub topology_file: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            notification_port: DEFAULT_NOTIFICATION_PORT,
            event_port: DEFAULT_EVENT_PORT,
            schedule_file: PathBuf::from(DEFAULT_SCHEDULE_FILE),
            topology_file: None,
        }
    }
}

impl ServiceConfig {
    /// Parses a service configuration file; absent keys keep their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading service configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open service configuration: {}", path.display()))?;
        // An empty document is a valid "all defaults" configuration.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))
    }
}

// ── Schedule file ─────────────────────────────────────────────────────────────

/// Reads a schedule YAML file.
pub fn load_schedule_file(path: &Path) -> Result<Schedule> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open schedule file: {}", path.display()))?;
    let schedule: Schedule = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse schedule file: {}", path.display()))?;

    debug!(
        traffic_classes = schedule.traffic_classes.len(),
        gating_cycle_ms = schedule.gating_cycle,
        "Parsed schedule"
    );
    Ok(schedule)
}

// ── Topology file ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum NodeType {
    EndNode,
    #[default]
    Bridge,
}

#[derive(Debug, Deserialize)]
struct TopologyNodeEntry {
    name: String,
    #[serde(default, rename = "type")]
    node_type: NodeType,
    #[serde(default)]
    ports: Vec<Port>,
}

/// Topology file as written on disk.  Links stay raw until loaded from the
/// store.
#[derive(Debug, Default, Deserialize)]
pub struct TopologyFile {
    #[serde(default)]
    nodes: Vec<TopologyNodeEntry>,
    #[serde(default)]
    links: Vec<RawLink>,
}

impl TopologyFile {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading topology from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open topology file: {}", path.display()))?;
        let file: TopologyFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse topology file: {}", path.display()))?;
        if file.nodes.is_empty() {
            warn!("Topology file {} contains no nodes", path.display());
        }
        Ok(file)
    }

    /// Nodes with their kind, in file order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKind, Node)> + '_ {
        self.nodes.iter().map(|entry| {
            let kind = match entry.node_type {
                NodeType::EndNode => NodeKind::EndNode,
                NodeType::Bridge => NodeKind::Bridge,
            };
            let node = Node {
                name: entry.name.clone(),
                ports: entry.ports.clone(),
            };
            (kind, node)
        })
    }

    pub fn links(&self) -> &[RawLink] {
        &self.links
    }

    /// Writes every node and link into `store`.
    pub fn seed(&self, store: &dyn ConfigStore) -> Result<()> {
        for (kind, node) in self.nodes() {
            debug!(node = %node.name, ?kind, ports = node.ports.len(), "Storing node");
            store
                .store_node(kind, &node)
                .with_context(|| format!("Failed to store node {}", node.name))?;
        }
        for link in &self.links {
            store.store_link(link).context("Failed to store link")?;
        }
        info!(
            nodes = self.nodes.len(),
            links = self.links.len(),
            "Topology stored"
        );
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
