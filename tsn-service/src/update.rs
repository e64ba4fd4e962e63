/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Update emitter: typed leaf values and their gNMI wire form.
//!
//! ```text
//! Cursor::set ──► Update { path, target, value } ──(From)──► gnmi::Update
//!                   ↑ domain form                               ↑ wire form
//! ```
//!
//! Conversion to the protobuf types only happens at the gRPC boundary; the
//! rest of the crate works with [`Update`] and [`TypedValue`].

use serde::{Deserialize, Serialize};

use crate::proto::gnmi;
use crate::tree::{Path, PathSegment};

// ── TypedValue ────────────────────────────────────────────────────────────────

/// Scalar carried by an update.  Mirrors the subset of `gnmi.TypedValue`
/// used for bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypedValue {
    String(String),
    Int(i64),
    Uint(u64),
    Bool(bool),
    Bytes(Vec<u8>),
}

impl TypedValue {
    /// Textual form stored in the configuration tree.
    ///
    /// Bytes are rendered as lowercase hex without separators.
    pub fn render(&self) -> String {
        match self {
            TypedValue::String(s) => s.clone(),
            TypedValue::Int(v) => v.to_string(),
            TypedValue::Uint(v) => v.to_string(),
            TypedValue::Bool(v) => v.to_string(),
            TypedValue::Bytes(bytes) => bytes.iter().map(|b| format!("{b:02x}")).collect(),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::String(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::String(value)
    }
}

impl From<TypedValue> for gnmi::TypedValue {
    fn from(value: TypedValue) -> Self {
        use gnmi::typed_value::Value;
        let value = match value {
            TypedValue::String(s) => Value::StringVal(s),
            TypedValue::Int(v) => Value::IntVal(v),
            TypedValue::Uint(v) => Value::UintVal(v),
            TypedValue::Bool(v) => Value::BoolVal(v),
            TypedValue::Bytes(b) => Value::BytesVal(b),
        };
        gnmi::TypedValue { value: Some(value) }
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

/// One leaf write addressed to a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub path: Path,
    /// Device address the update is sent to.
    pub target: String,
    pub value: TypedValue,
}

impl Update {
    pub fn new(path: Path, target: impl Into<String>, value: TypedValue) -> Self {
        Self {
            path,
            target: target.into(),
            value,
        }
    }

    /// Name of the leaf being written.
    pub fn leaf(&self) -> Option<&str> {
        self.path.last().map(PathSegment::name)
    }
}

impl From<&PathSegment> for gnmi::PathElem {
    fn from(segment: &PathSegment) -> Self {
        gnmi::PathElem {
            name: segment.name().to_string(),
            key: segment
                .keys()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl From<Update> for gnmi::Update {
    fn from(update: Update) -> Self {
        gnmi::Update {
            path: Some(gnmi::Path {
                origin: String::new(),
                elem: update.path.segments().iter().map(gnmi::PathElem::from).collect(),
                target: update.target,
            }),
            val: Some(update.value.into()),
            duplicates: 0,
        }
    }
}

/// Packs `updates` into a single gNMI `SetRequest` (all as `update`
/// operations, no prefix).
pub fn set_request(updates: impl IntoIterator<Item = Update>) -> gnmi::SetRequest {
    gnmi::SetRequest {
        prefix: None,
        delete: Vec::new(),
        replace: Vec::new(),
        update: updates.into_iter().map(gnmi::Update::from).collect(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ConfigTree;

    #[test]
    fn render_matches_tree_text_form() {
        assert_eq!(TypedValue::from("set-gate-states").render(), "set-gate-states");
        assert_eq!(TypedValue::Int(-3).render(), "-3");
        assert_eq!(TypedValue::Uint(255).render(), "255");
        assert_eq!(TypedValue::Bool(false).render(), "false");
        assert_eq!(TypedValue::Bytes(vec![0x00, 0x1b, 0xff]).render(), "001bff");
    }

    #[test]
    fn typed_values_map_onto_gnmi_oneof() {
        use gnmi::typed_value::Value;
        let cases = [
            (TypedValue::from("x"), Value::StringVal("x".into())),
            (TypedValue::Int(-1), Value::IntVal(-1)),
            (TypedValue::Uint(7), Value::UintVal(7)),
            (TypedValue::Bool(true), Value::BoolVal(true)),
            (TypedValue::Bytes(vec![1, 2]), Value::BytesVal(vec![1, 2])),
        ];
        for (ours, wire) in cases {
            assert_eq!(gnmi::TypedValue::from(ours).value, Some(wire));
        }
    }

    #[test]
    fn update_converts_to_gnmi_with_target_and_keys() {
        let mut tree = ConfigTree::new();
        let update = tree
            .cursor("192.168.0.2")
            .by_namespace("interfaces", "urn:ietf:params:xml:ns:yang:ietf-interfaces")
            .unwrap()
            .by_1_key("", "interface", "name", "sw0p1")
            .unwrap()
            .by_name("admin-gate-states")
            .unwrap()
            .set(TypedValue::Uint(255))
            .unwrap();
        assert_eq!(update.leaf(), Some("admin-gate-states"));

        let wire = gnmi::Update::from(update);
        let path = wire.path.unwrap();
        assert_eq!(path.target, "192.168.0.2");
        assert_eq!(path.elem.len(), 3);
        assert_eq!(path.elem[0].name, "interfaces");
        assert_eq!(
            path.elem[0].key.get("namespace").map(String::as_str),
            Some("urn:ietf:params:xml:ns:yang:ietf-interfaces")
        );
        assert_eq!(path.elem[1].key.get("name").map(String::as_str), Some("sw0p1"));
        assert!(path.elem[2].key.is_empty());
        assert_eq!(
            wire.val.unwrap().value,
            Some(gnmi::typed_value::Value::UintVal(255))
        );
    }

    #[test]
    fn set_request_keeps_update_order() {
        let updates = vec![
            Update::new(Path::new(), "t", TypedValue::Uint(1)),
            Update::new(Path::new(), "t", TypedValue::Uint(2)),
        ];
        let req = set_request(updates);
        assert!(req.prefix.is_none());
        assert_eq!(req.update.len(), 2);
        assert_eq!(
            req.update[1].val.as_ref().and_then(|v| v.value.clone()),
            Some(gnmi::typed_value::Value::UintVal(2))
        );
    }
}
