/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! gRPC handlers for the `tsn.Notification` and `tsn.NotificationService`
//! services.
//!
//! ```text
//!  client ──CalcConfig(IdList)──────────► NotificationHandler ──► optimizer
//!         ◄─────────────UUID────────────             │
//!  client ──GetConfiguration(UUID)──────►            └──► ConfigStore
//!         ◄──GclConfiguration (one gnmi.SetRequest per port)──
//!
//!  control plane ──ConfigNotification(Event)──► EventHandler (log only)
//! ```
//!
//! Errors are mapped to status codes as follows:
//!
//! | Error | Status |
//! |---|---|
//! | `StoreError::NotFound` | `NOT_FOUND` |
//! | `StoreError::Codec` / `Poisoned` | `INTERNAL` |
//! | `ConfigError` (validation) | `INVALID_ARGUMENT` |
//! | `ServiceError::Compile` | `INTERNAL` |
//! | `ServiceError::Schedule` | `FAILED_PRECONDITION` |

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::{error, info};

use crate::error::ConfigError;
use crate::optimizer::{calculate_configuration, ServiceError};
use crate::proto::tsn::{
    self, notification_server::Notification, notification_service_server::NotificationService,
};
use crate::schedule::GclConfiguration;
use crate::store::{ConfigStore, StoreError};
use crate::update::set_request;

// ── Status mapping ────────────────────────────────────────────────────────────

impl From<StoreError> for Status {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Status::not_found(e.to_string()),
            StoreError::Codec { .. } | StoreError::Poisoned => Status::internal(e.to_string()),
        }
    }
}

impl From<ConfigError> for Status {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Tree(_) => Status::internal(e.to_string()),
            _ => Status::invalid_argument(e.to_string()),
        }
    }
}

impl From<ServiceError> for Status {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Store(inner) => inner.into(),
            ServiceError::Compile(_) => Status::internal(e.to_string()),
            ServiceError::Schedule(_) => Status::failed_precondition(e.to_string()),
        }
    }
}

// ── Notification ──────────────────────────────────────────────────────────────

/// Serves `CalcConfig` and `GetConfiguration` from a shared store.
pub struct NotificationHandler {
    store: Arc<dyn ConfigStore>,
}

impl NotificationHandler {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }
}

/// Converts a stored configuration into its wire form.
pub fn to_proto(config: GclConfiguration) -> tsn::GclConfiguration {
    tsn::GclConfiguration {
        configs: config
            .configs
            .into_iter()
            .map(|port| tsn::PortConfiguration {
                node_port: port.node_port(),
                set_request: Some(set_request(port.updates)),
            })
            .collect(),
    }
}

#[tonic::async_trait]
impl Notification for NotificationHandler {
    async fn calc_config(
        &self,
        request: Request<tsn::IdList>,
    ) -> Result<Response<tsn::Uuid>, Status> {
        let ids: Vec<String> = request
            .into_inner()
            .values
            .into_iter()
            .map(|id| id.value)
            .collect();
        info!(requests = ids.len(), "CalcConfig received");

        let id = calculate_configuration(self.store.as_ref(), &ids).map_err(|e| {
            error!("Configuration calculation failed: {:#}", e);
            Status::from(e)
        })?;

        Ok(Response::new(tsn::Uuid { value: id }))
    }

    async fn get_configuration(
        &self,
        request: Request<tsn::Uuid>,
    ) -> Result<Response<tsn::GclConfiguration>, Status> {
        let id = request.into_inner().value;
        if id.is_empty() {
            return Err(Status::invalid_argument("configuration id must not be empty"));
        }

        let config = self.store.load_configuration(&id)?;
        info!(configuration = %id, ports = config.configs.len(), "GetConfiguration served");
        Ok(Response::new(to_proto(config)))
    }
}

// ── NotificationService ───────────────────────────────────────────────────────

/// Acknowledges configuration events.  Events are logged and not acted on.
#[derive(Debug, Default)]
pub struct EventHandler;

#[tonic::async_trait]
impl NotificationService for EventHandler {
    async fn config_notification(
        &self,
        request: Request<tsn::Event>,
    ) -> Result<Response<tsn::Received>, Status> {
        let event = request.into_inner();
        info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            source = %event.source,
            "Configuration event received"
        );
        Ok(Response::new(tsn::Received {}))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::DEFAULT_SCHEDULE_ID;
    use crate::proto::gnmi::typed_value::Value;
    use crate::schedule::{Node, Schedule, TrafficClass};
    use crate::store::{MemoryStore, NodeKind};
    use tonic::Code;

    fn store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
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
        store
            .store_node(NodeKind::Bridge, &Node::new("sw1", ["p1", "p2"]))
            .unwrap();
        store.store_request("r1", "talker: es1").unwrap();
        store
    }

    fn id_list(ids: &[&str]) -> tsn::IdList {
        tsn::IdList {
            values: ids
                .iter()
                .map(|v| tsn::Id {
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    // ── CalcConfig / GetConfiguration ─────────────────────────────────────────

    #[tokio::test]
    async fn calc_then_get_returns_one_set_request_per_port() {
        let handler = NotificationHandler::new(store());

        let uuid = handler
            .calc_config(Request::new(id_list(&["r1"])))
            .await
            .unwrap()
            .into_inner();
        assert!(!uuid.value.is_empty());

        let gcl = handler
            .get_configuration(Request::new(uuid))
            .await
            .unwrap()
            .into_inner();
        let ports: Vec<_> = gcl.configs.iter().map(|c| c.node_port.as_str()).collect();
        assert_eq!(ports, ["sw1.p1", "sw1.p2"]);

        let req = gcl.configs[0].set_request.as_ref().unwrap();
        assert_eq!(req.update.len(), 9 + 3 * 2);

        let first = &req.update[0];
        let path = first.path.as_ref().unwrap();
        assert_eq!(path.target, "sw1");
        assert_eq!(path.elem.last().unwrap().name, "gate-enabled");
        assert_eq!(
            first.val.as_ref().unwrap().value,
            Some(Value::BoolVal(true))
        );
    }

    #[tokio::test]
    async fn unknown_request_id_is_not_found() {
        let handler = NotificationHandler::new(store());
        let status = handler
            .calc_config(Request::new(id_list(&["r1", "missing"])))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn missing_schedule_is_not_found() {
        let handler = NotificationHandler::new(Arc::new(MemoryStore::new()));
        let status = handler
            .calc_config(Request::new(id_list(&[])))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn unknown_configuration_is_not_found() {
        let handler = NotificationHandler::new(store());
        let status = handler
            .get_configuration(Request::new(tsn::Uuid {
                value: "00000000-0000-0000-0000-000000000000".into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn empty_configuration_id_is_invalid() {
        let handler = NotificationHandler::new(store());
        let status = handler
            .get_configuration(Request::new(tsn::Uuid::default()))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    // ── ConfigNotification ────────────────────────────────────────────────────

    #[tokio::test]
    async fn events_are_acknowledged() {
        let reply = EventHandler
            .config_notification(Request::new(tsn::Event {
                event_id: "e1".into(),
                event_type: "topology-changed".into(),
                source: "cnc".into(),
            }))
            .await
            .unwrap();
        assert_eq!(reply.into_inner(), tsn::Received {});
    }

    // ── Status mapping ────────────────────────────────────────────────────────

    #[test]
    fn errors_map_to_status_codes() {
        let poisoned: Status = StoreError::Poisoned.into();
        assert_eq!(poisoned.code(), Code::Internal);

        let invalid: Status = ConfigError::out_of_range("priority", 9, 0, 7).into();
        assert_eq!(invalid.code(), Code::InvalidArgument);

        let schedule: Status = ServiceError::Schedule(anyhow::anyhow!("bad yaml")).into();
        assert_eq!(schedule.code(), Code::FailedPrecondition);
    }
}
