/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Configuration calculation.
//!
//! There is no optimisation step: every port in the topology receives the
//! schedule stored under [`DEFAULT_SCHEDULE_ID`].
//!
//! ```text
//! request ids ──► check each exists ──► load topology ──► load default schedule
//!                                                           │
//!                     configuration id ◄── store ◄── compile
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::schedule::compile;
use crate::store::{ConfigStore, StoreError};
use crate::tree::TreeError;

/// Store id of the schedule applied to every port.
pub const DEFAULT_SCHEDULE_ID: &str = "default_schedule";

/// Failures of a configuration run.
///
/// | Variant | gRPC status |
/// |---|---|
/// | `Store(NotFound)` | `NotFound` |
/// | `Store(_)` | `Internal` |
/// | `Compile` | `Internal` |
/// | `Schedule` | `FailedPrecondition` |
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to compile schedule: {0}")]
    Compile(#[from] TreeError),

    #[error("failed to load default schedule: {0:#}")]
    Schedule(anyhow::Error),
}

/// Reads the schedule file at `path` and stores it as the default schedule.
pub fn create_default_schedule(store: &dyn ConfigStore, path: &Path) -> Result<(), ServiceError> {
    let schedule = crate::config::load_schedule_file(path).map_err(ServiceError::Schedule)?;
    schedule.check_portions();
    store.store_schedule(DEFAULT_SCHEDULE_ID, &schedule)?;
    info!(
        id = DEFAULT_SCHEDULE_ID,
        path = %path.display(),
        traffic_classes = schedule.traffic_classes.len(),
        "Stored default schedule"
    );
    Ok(())
}

/// Compiles a configuration for the stream requests `request_ids` and
/// returns the id it was stored under.
///
/// Every request must exist.  A missing request or a missing default
/// schedule aborts the run before anything is stored.
pub fn calculate_configuration(
    store: &dyn ConfigStore,
    request_ids: &[String],
) -> Result<String, ServiceError> {
    for id in request_ids {
        store.load_request(id)?;
        info!(request = %id, "Loaded stream request");
    }

    let topology = store.load_topology()?;
    info!(
        nodes = topology.nodes.len(),
        links = topology.links.len(),
        "Loaded topology"
    );

    let schedule = store.load_schedule(DEFAULT_SCHEDULE_ID)?;
    let config = compile(&schedule, &topology)?;

    let id = Uuid::new_v4().to_string();
    store.store_configuration(&id, &config)?;
    info!(configuration = %id, ports = config.configs.len(), "Stored configuration");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::schedule::{Node, Schedule, TrafficClass};
    use crate::store::{MemoryStore, NodeKind};

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .store_schedule(
                DEFAULT_SCHEDULE_ID,
                &Schedule {
                    traffic_classes: vec![
                        TrafficClass::new("network-control", 30),
                        TrafficClass::new("best-effort", 70),
                    ],
                    gating_cycle: 1.0,
                },
            )
            .unwrap();
        store.store_node(NodeKind::Bridge, &Node::new("sw1", ["p1"])).unwrap();
        store.store_request("r1", "stream: a").unwrap();
        store
    }

    #[test]
    fn calculation_stores_and_returns_a_new_id() {
        let store = seeded_store();
        let id = calculate_configuration(&store, &["r1".to_string()]).unwrap();
        assert!(Uuid::parse_str(&id).is_ok(), "{id} is not a UUID");

        let config = store.load_configuration(&id).unwrap();
        assert_eq!(config.configs.len(), 1);
        assert_eq!(config.configs[0].gate_control_list[0].duration_ns, 300_000);
    }

    #[test]
    fn ids_differ_between_runs() {
        let store = seeded_store();
        let a = calculate_configuration(&store, &[]).unwrap();
        let b = calculate_configuration(&store, &[]).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.configuration_ids().unwrap().len(), 2);
    }

    #[test]
    fn missing_request_aborts_before_storing() {
        let store = seeded_store();
        let err = calculate_configuration(&store, &["r1".into(), "r2".into()]).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Store(StoreError::NotFound { ref key }) if key == "streams.requests.r2"
        ));
        assert!(store.configuration_ids().unwrap().is_empty());
    }

    #[test]
    fn missing_schedule_is_not_found() {
        let store = MemoryStore::new();
        let err = calculate_configuration(&store, &[]).unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::NotFound { .. })));
    }

    #[test]
    fn default_schedule_is_read_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "trafficClasses:\n  - name: isochronous\n    assignedPortion: 60\n  - name: best-effort\n    assignedPortion: 40\ngatingCycle: 2.0\n"
        )
        .unwrap();

        let store = MemoryStore::new();
        create_default_schedule(&store, file.path()).unwrap();
        let sched = store.load_schedule(DEFAULT_SCHEDULE_ID).unwrap();
        assert_eq!(sched.traffic_classes.len(), 2);
        assert_eq!(sched.gating_cycle, 2.0);
    }

    #[test]
    fn unreadable_schedule_file_is_reported() {
        let store = MemoryStore::new();
        let err = create_default_schedule(&store, Path::new("/nonexistent/schedule.yaml")).unwrap_err();
        assert!(matches!(err, ServiceError::Schedule(_)));
        assert!(store.is_empty().unwrap());
    }
}
