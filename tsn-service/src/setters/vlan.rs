/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! VLAN bridge-port parameters and VLAN names (802.1Q-2018 6.9, 12.10).

use std::fmt;
use std::str::FromStr;

use crate::error::{check_length, ConfigError};
use crate::paths::{self, DOT1Q_BRIDGE_NS};
use crate::tree::ConfigTree;
use crate::update::{TypedValue, Update};

/// Longest VLAN name the YANG model accepts.
pub const MAX_VLAN_NAME_LEN: usize = 32;

const RESERVED_PVIDS: [u16; 2] = [0, 4095];

// ── AcceptableFrame ───────────────────────────────────────────────────────────

/// Which frames a port admits on ingress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptableFrame {
    #[default]
    AdmitAll,
    AdmitOnlyVlanTagged,
    AdmitOnlyUntaggedAndPriorityTagged,
}

impl AcceptableFrame {
    pub fn as_str(self) -> &'static str {
        match self {
            AcceptableFrame::AdmitAll => "admit-all-frames",
            AcceptableFrame::AdmitOnlyVlanTagged => "admit-only-VLAN-tagged-frames",
            AcceptableFrame::AdmitOnlyUntaggedAndPriorityTagged => {
                "admit-only-untagged-and-priority-tagged"
            }
        }
    }
}

impl fmt::Display for AcceptableFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcceptableFrame {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            AcceptableFrame::AdmitAll,
            AcceptableFrame::AdmitOnlyVlanTagged,
            AcceptableFrame::AdmitOnlyUntaggedAndPriorityTagged,
        ]
        .into_iter()
        .find(|f| f.as_str() == s)
        .ok_or_else(|| ConfigError::UnknownEnumValue {
            what: "acceptable frame type",
            value: s.to_string(),
            valid: "admit-all-frames, admit-only-VLAN-tagged-frames, \
                    admit-only-untagged-and-priority-tagged",
        })
    }
}

// ── Bridge-port VLAN configuration ────────────────────────────────────────────

/// VLAN parameters of one bridge port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeVlanConfig {
    pub pvid: u16,
    pub acceptable_frame: AcceptableFrame,
    pub enable_ingress_filtering: bool,
    pub enable_restricted_vlan_registration: bool,
}

impl Default for BridgeVlanConfig {
    fn default() -> Self {
        Self {
            pvid: 1,
            acceptable_frame: AcceptableFrame::AdmitAll,
            enable_ingress_filtering: false,
            enable_restricted_vlan_registration: false,
        }
    }
}

impl BridgeVlanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if RESERVED_PVIDS.contains(&self.pvid) {
            return Err(ConfigError::out_of_range("pvid", self.pvid, 1, 4094));
        }
        Ok(())
    }
}

/// Writes `pvid`, `acceptable-frame`, `enable-ingress-filtering` and
/// `enable-restricted-vlan-registration` below the bridge port.
pub fn set_bridge_vlan_configuration(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
    config: &BridgeVlanConfig,
) -> Result<Vec<Update>, ConfigError> {
    config.validate()?;

    let mut bridge_port = paths::bridge_port(tree, port, target)?;
    let leaves = [
        ("pvid", TypedValue::Uint(config.pvid.into())),
        ("acceptable-frame", config.acceptable_frame.as_str().into()),
        (
            "enable-ingress-filtering",
            TypedValue::Bool(config.enable_ingress_filtering),
        ),
        (
            "enable-restricted-vlan-registration",
            TypedValue::Bool(config.enable_restricted_vlan_registration),
        ),
    ];

    let mut updates = Vec::with_capacity(leaves.len());
    for (leaf, value) in leaves {
        updates.push(bridge_port.fork().by_name(leaf)?.set(value)?);
    }
    Ok(updates)
}

/// [`set_bridge_vlan_configuration`] with the standard defaults.
pub fn set_default_bridge_vlan_configuration(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
) -> Result<Vec<Update>, ConfigError> {
    set_bridge_vlan_configuration(tree, port, target, &BridgeVlanConfig::default())
}

// ── VLAN name ─────────────────────────────────────────────────────────────────

/// Names VLAN `vid` on component `component` of bridge `bridge`.
pub fn set_vlan_name(
    tree: &mut ConfigTree,
    target: &str,
    bridge: &str,
    component: &str,
    vid: u16,
    name: &str,
) -> Result<Update, ConfigError> {
    check_length("VLAN name", name, MAX_VLAN_NAME_LEN)?;

    let update = tree
        .cursor(target)
        .by_namespace("ieee802-dot1q-bridge", DOT1Q_BRIDGE_NS)?
        .by_1_key("bridges", "bridge", "name", bridge)?
        .by_1_key("", "component", "name", component)?
        .by_name("bridge-vlan")?
        .by_1_key("", "vlan", "vid", &vid.to_string())?
        .by_name("name")?
        .set(name.into())?;
    Ok(update)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_write_four_leaves() {
        let mut tree = ConfigTree::new();
        let updates = set_default_bridge_vlan_configuration(&mut tree, "p1", "t").unwrap();

        let leaves: Vec<_> = updates.iter().filter_map(Update::leaf).collect();
        assert_eq!(
            leaves,
            [
                "pvid",
                "acceptable-frame",
                "enable-ingress-filtering",
                "enable-restricted-vlan-registration"
            ]
        );
        assert_eq!(updates[0].value, TypedValue::Uint(1));
        assert_eq!(updates[1].value, TypedValue::from("admit-all-frames"));
        assert_eq!(updates[2].value, TypedValue::Bool(false));
    }

    #[test]
    fn reserved_pvids_are_rejected_before_writing() {
        let mut tree = ConfigTree::new();
        for pvid in [0, 4095] {
            let config = BridgeVlanConfig {
                pvid,
                ..BridgeVlanConfig::default()
            };
            let err = set_bridge_vlan_configuration(&mut tree, "p1", "t", &config).unwrap_err();
            assert!(matches!(err, ConfigError::OutOfRange { what: "pvid", .. }));
        }
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn acceptable_frame_parses_only_yang_literals() {
        assert_eq!(
            "admit-only-VLAN-tagged-frames".parse::<AcceptableFrame>().unwrap(),
            AcceptableFrame::AdmitOnlyVlanTagged
        );
        assert!(matches!(
            "admit-some-frames".parse::<AcceptableFrame>(),
            Err(ConfigError::UnknownEnumValue { .. })
        ));
    }

    #[test]
    fn vlan_name_lives_under_bridge_component_and_vid() {
        let mut tree = ConfigTree::new();
        let update = set_vlan_name(&mut tree, "t", "br0", "c0", 10, "office").unwrap();

        let segs = update.path.segments();
        assert_eq!(segs[0].namespace(), Some(DOT1Q_BRIDGE_NS));
        assert_eq!(segs[1].name(), "bridges");
        assert_eq!(segs[1].key("name"), Some("br0"));
        assert_eq!(segs[2].key("name"), Some("c0"));
        assert_eq!(segs[4].key("vid"), Some("10"));
        assert_eq!(update.leaf(), Some("name"));
        assert_eq!(update.value, TypedValue::from("office"));
    }

    #[test]
    fn vlan_name_longer_than_32_characters_is_rejected() {
        let mut tree = ConfigTree::new();
        let err = set_vlan_name(&mut tree, "t", "br0", "c0", 10, &"n".repeat(33)).unwrap_err();
        assert!(matches!(err, ConfigError::LengthViolation { len: 33, max: 32, .. }));
        assert_eq!(tree.node_count(), 1);
    }
}
