/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

/// Proto-generated modules.
///
/// `tonic::include_proto!` expands to an `include!` of the file that
/// prost/tonic-build wrote into `OUT_DIR` during the build script.
///
/// The two modules must stay siblings: messages in `tsn` refer to gNMI types
/// as `super::gnmi::…`.
pub mod gnmi {
    tonic::include_proto!("gnmi");
}

pub mod tsn {
    tonic::include_proto!("tsn");
}
