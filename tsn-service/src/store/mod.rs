/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Key/value store for schedules, topology, stream requests and compiled
//! configurations.
//!
//! Keys use a dotted layout:
//!
//! | Key | Value |
//! |---|---|
//! | `configurations.schedules.<id>` | [`Schedule`] |
//! | `configurations.tsn-configuration.<id>` | [`GclConfiguration`] |
//! | `streams.requests.<id>` | stream request document (opaque) |
//! | `endnodes.<name>` | [`Node`] |
//! | `bridges.<name>` | [`Node`] |
//! | `links.<n>` | [`RawLink`] |
//!
//! [`MemoryStore`] keeps every value as a YAML string, the way an external
//! key/value service would hold serialised bytes.  Topology entries are
//! decoded leniently: a link or node that fails to decode is skipped with a
//! warning, everything else is a hard [`StoreError`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::schedule::{GclConfiguration, Node, RawLink, Schedule, Topology};

pub const SCHEDULES_PREFIX: &str = "configurations.schedules";
pub const CONFIGURATIONS_PREFIX: &str = "configurations.tsn-configuration";
pub const REQUESTS_PREFIX: &str = "streams.requests";
pub const ENDNODES_PREFIX: &str = "endnodes";
pub const BRIDGES_PREFIX: &str = "bridges";
pub const LINKS_PREFIX: &str = "links";

fn key(prefix: &str, id: &str) -> String {
    format!("{prefix}.{id}")
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Store access failures.
///
/// | Variant | Suggested gRPC status |
/// |---|---|
/// | `NotFound` | `NotFound` |
/// | `Codec` | `Internal` |
/// | `Poisoned` | `Internal` |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no entry stored under '{key}'")]
    NotFound { key: String },

    /// A stored value could not be encoded or decoded.
    #[error("entry '{key}' could not be (de)serialised: {message}")]
    Codec { key: String, message: String },

    #[error("store lock poisoned")]
    Poisoned,
}

/// Kind of device a topology node describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    EndNode,
    Bridge,
}

impl NodeKind {
    fn prefix(self) -> &'static str {
        match self {
            NodeKind::EndNode => ENDNODES_PREFIX,
            NodeKind::Bridge => BRIDGES_PREFIX,
        }
    }
}

// ── ConfigStore ───────────────────────────────────────────────────────────────

/// Persistence used by the optimizer and the gRPC layer.
///
/// Implementations must be safe to share between concurrent requests.
pub trait ConfigStore: Send + Sync {
    fn store_schedule(&self, id: &str, schedule: &Schedule) -> Result<(), StoreError>;
    fn load_schedule(&self, id: &str) -> Result<Schedule, StoreError>;

    fn store_node(&self, kind: NodeKind, node: &Node) -> Result<(), StoreError>;
    /// Stores `link` under the next free `links.<n>` key.
    fn store_link(&self, link: &RawLink) -> Result<(), StoreError>;
    /// End nodes, then bridges, then all links that parse.
    fn load_topology(&self) -> Result<Topology, StoreError>;

    fn store_request(&self, id: &str, request: &str) -> Result<(), StoreError>;
    fn load_request(&self, id: &str) -> Result<String, StoreError>;

    fn store_configuration(&self, id: &str, config: &GclConfiguration) -> Result<(), StoreError>;
    fn load_configuration(&self, id: &str) -> Result<GclConfiguration, StoreError>;
    /// Ids of all stored configurations, sorted.
    fn configuration_ids(&self) -> Result<Vec<String>, StoreError>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for std::sync::Arc<T> {
    fn store_schedule(&self, id: &str, schedule: &Schedule) -> Result<(), StoreError> {
        (**self).store_schedule(id, schedule)
    }
    fn load_schedule(&self, id: &str) -> Result<Schedule, StoreError> {
        (**self).load_schedule(id)
    }
    fn store_node(&self, kind: NodeKind, node: &Node) -> Result<(), StoreError> {
        (**self).store_node(kind, node)
    }
    fn store_link(&self, link: &RawLink) -> Result<(), StoreError> {
        (**self).store_link(link)
    }
    fn load_topology(&self) -> Result<Topology, StoreError> {
        (**self).load_topology()
    }
    fn store_request(&self, id: &str, request: &str) -> Result<(), StoreError> {
        (**self).store_request(id, request)
    }
    fn load_request(&self, id: &str) -> Result<String, StoreError> {
        (**self).load_request(id)
    }
    fn store_configuration(&self, id: &str, config: &GclConfiguration) -> Result<(), StoreError> {
        (**self).store_configuration(id, config)
    }
    fn load_configuration(&self, id: &str) -> Result<GclConfiguration, StoreError> {
        (**self).load_configuration(id)
    }
    fn configuration_ids(&self) -> Result<Vec<String>, StoreError> {
        (**self).configuration_ids()
    }
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

/// In-process [`ConfigStore`] backed by a sorted map of YAML strings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
    /// Next `links.<n>` index.
    link_seq: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.entries.read().map_err(|_| StoreError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn put<V: Serialize>(&self, key: String, value: &V) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(value).map_err(|e| StoreError::Codec {
            key: key.clone(),
            message: e.to_string(),
        })?;
        self.put_raw(key, yaml)
    }

    fn put_raw(&self, key: String, value: String) -> Result<(), StoreError> {
        debug!(%key, "store write");
        self.entries
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(key, value);
        Ok(())
    }

    fn get_raw(&self, key: &str) -> Result<String, StoreError> {
        self.entries
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    fn get<V: DeserializeOwned>(&self, key: &str) -> Result<V, StoreError> {
        let raw = self.get_raw(key)?;
        serde_yaml::from_str(&raw).map_err(|e| StoreError::Codec {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// All `(key, value)` pairs under `prefix.`, in key order.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        let start = format!("{prefix}.");
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries
            .range(start.clone()..)
            .take_while(|(k, _)| k.starts_with(&start))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    /// Decodes every value under `prefix`, skipping undecodable ones.
    fn scan_lenient<V: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<V>, StoreError> {
        let values = self
            .scan(prefix)?
            .into_iter()
            .filter_map(|(key, raw)| match serde_yaml::from_str(&raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(%key, error = %e, "Skipping undecodable store entry");
                    None
                }
            })
            .collect();
        Ok(values)
    }
}

impl ConfigStore for MemoryStore {
    fn store_schedule(&self, id: &str, schedule: &Schedule) -> Result<(), StoreError> {
        self.put(key(SCHEDULES_PREFIX, id), schedule)
    }

    fn load_schedule(&self, id: &str) -> Result<Schedule, StoreError> {
        self.get(&key(SCHEDULES_PREFIX, id))
    }

    fn store_node(&self, kind: NodeKind, node: &Node) -> Result<(), StoreError> {
        self.put(key(kind.prefix(), &node.name), node)
    }

    fn store_link(&self, link: &RawLink) -> Result<(), StoreError> {
        // Zero-padded so that key order equals allocation order.
        let n = self.link_seq.fetch_add(1, Ordering::Relaxed);
        self.put(key(LINKS_PREFIX, &format!("{n:06}")), link)
    }

    fn load_topology(&self) -> Result<Topology, StoreError> {
        let mut nodes: Vec<Node> = self.scan_lenient(ENDNODES_PREFIX)?;
        nodes.extend(self.scan_lenient::<Node>(BRIDGES_PREFIX)?);
        let links: Vec<RawLink> = self.scan_lenient(LINKS_PREFIX)?;
        Ok(Topology::new(nodes, links))
    }

    fn store_request(&self, id: &str, request: &str) -> Result<(), StoreError> {
        self.put_raw(key(REQUESTS_PREFIX, id), request.to_string())
    }

    fn load_request(&self, id: &str) -> Result<String, StoreError> {
        self.get_raw(&key(REQUESTS_PREFIX, id))
    }

    fn store_configuration(&self, id: &str, config: &GclConfiguration) -> Result<(), StoreError> {
        self.put(key(CONFIGURATIONS_PREFIX, id), config)
    }

    fn load_configuration(&self, id: &str) -> Result<GclConfiguration, StoreError> {
        self.get(&key(CONFIGURATIONS_PREFIX, id))
    }

    fn configuration_ids(&self) -> Result<Vec<String>, StoreError> {
        let start = CONFIGURATIONS_PREFIX.len() + 1;
        Ok(self
            .scan(CONFIGURATIONS_PREFIX)?
            .into_iter()
            .map(|(k, _)| k[start..].to_string())
            .collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
