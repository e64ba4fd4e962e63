/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

/// Build script – compiles protobuf definitions into Rust source code.
///
/// tonic-build wraps prost-build and additionally generates tonic server/client
/// stubs.  The generated files are written to `OUT_DIR` (managed by Cargo) and
/// pulled into the crate via `tonic::include_proto!` in `src/proto/mod.rs`.
///
/// Prerequisites
/// -------------
/// `protoc` (the protobuf compiler) must be available on `$PATH`, or its path
/// must be set in the `PROTOC` environment variable before running `cargo build`.
/// Install on Ubuntu/Debian: `sudo apt install -y protobuf-compiler`
/// Install on macOS:          `brew install protobuf`

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_root = "proto";
    let proto_files = [
        format!("{}/gnmi.proto", proto_root),
        format!("{}/tsn.proto", proto_root),
    ];

    for file in &proto_files {
        println!("cargo:rerun-if-changed={}", file);
    }

    tonic_build::configure()
        // Notification services are served here and driven by clients in tests
        .build_server(true)
        .build_client(true)
        // gNMI path keys are emitted in sorted order so generated SetRequests
        // are byte-for-byte reproducible.
        .btree_map(["."])
        .compile_protos(&proto_files, &[proto_root])?;

    Ok(())
}
