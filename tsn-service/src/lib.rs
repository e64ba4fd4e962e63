/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! TSN service – gNMI configuration generation for IEEE 802.1Q bridges
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── proto/          – generated gRPC/protobuf types & stubs (gnmi, tsn)
//! ├── tree/           – configuration tree, paths and the descent cursor
//! ├── update.rs       – typed leaf updates and their gNMI conversion
//! ├── paths.rs        – shared anchors (interface, bridge-port, gate-parameters)
//! ├── error.rs        – validation errors
//! ├── tables/         – PCP, traffic-class and priority-regeneration tables
//! ├── setters/        – VLAN, MSTP and PSFP leaf setters
//! ├── schedule/       – schedule, topology and the gate control list compiler
//! ├── store/          – key/value store collaborator
//! ├── optimizer.rs    – configuration calculation
//! ├── config/         – service configuration and YAML input files
//! └── grpc/           – Notification / NotificationService handlers
//! ```

pub mod config;
pub mod error;
pub mod grpc;
pub mod optimizer;
pub mod paths;
pub mod proto;
pub mod schedule;
pub mod setters;
pub mod store;
pub mod tables;
pub mod tree;
pub mod update;
