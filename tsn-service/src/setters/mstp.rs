/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! MSTP configuration identification table (`ieee8021MstpConfigIdTable`).

use crate::error::{check_length, ConfigError};
use crate::paths::MSTP_NS;
use crate::tree::ConfigTree;
use crate::update::{TypedValue, Update};

pub const MIN_FORMAT_SELECTOR: i32 = 1;
pub const MAX_FORMAT_SELECTOR: i32 = 200_000_000;
pub const MAX_CONFIGURATION_NAME_LEN: usize = 32;
pub const MAX_REVISION_LEVEL: u32 = 65_535;

/// One row of the configuration identification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MstpConfigId {
    pub component_id: u32,
    pub format_selector: i32,
    pub configuration_name: String,
    pub revision_level: u32,
}

impl MstpConfigId {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FORMAT_SELECTOR..=MAX_FORMAT_SELECTOR).contains(&self.format_selector) {
            return Err(ConfigError::out_of_range(
                "MSTP format selector",
                self.format_selector,
                MIN_FORMAT_SELECTOR.into(),
                MAX_FORMAT_SELECTOR.into(),
            ));
        }
        check_length(
            "MSTP configuration name",
            &self.configuration_name,
            MAX_CONFIGURATION_NAME_LEN,
        )?;
        if self.revision_level > MAX_REVISION_LEVEL {
            return Err(ConfigError::out_of_range(
                "MSTP revision level",
                self.revision_level,
                0,
                MAX_REVISION_LEVEL.into(),
            ));
        }
        Ok(())
    }
}

/// Writes format selector, configuration name and revision level for the
/// row keyed by `config.component_id`.
pub fn set_mstp_config_table(
    tree: &mut ConfigTree,
    target: &str,
    config: &MstpConfigId,
) -> Result<Vec<Update>, ConfigError> {
    config.validate()?;

    let mut entry = tree.cursor(target).by_namespace("ieee8021-mstp", MSTP_NS)?.by_1_key(
        "ieee8021MstpConfigIdTable",
        "ieee8021MstpConfigIdEntry",
        "ieee8021MstpConfigIdComponentId",
        &config.component_id.to_string(),
    )?;

    let leaves = [
        (
            "ieee8021MstpConfigIdFormatSelector",
            TypedValue::Int(config.format_selector.into()),
        ),
        (
            "ieee8021MstpConfigurationName",
            TypedValue::from(config.configuration_name.as_str()),
        ),
        (
            "ieee8021MstpRevisionLevel",
            TypedValue::Uint(config.revision_level.into()),
        ),
    ];
    let mut updates = Vec::with_capacity(leaves.len());
    for (leaf, value) in leaves {
        updates.push(entry.fork().by_name(leaf)?.set(value)?);
    }
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MstpConfigId {
        MstpConfigId {
            component_id: 1,
            format_selector: 1,
            configuration_name: "region-a".into(),
            revision_level: 3,
        }
    }

    #[test]
    fn writes_three_leaves_in_table_mode() {
        let mut tree = ConfigTree::new();
        let updates = set_mstp_config_table(&mut tree, "t", &config()).unwrap();
        assert_eq!(updates.len(), 3);

        let table = &updates[0].path.segments()[1];
        assert_eq!(table.name(), "ieee8021MstpConfigIdTable");
        assert_eq!(table.key("ieee8021MstpConfigIdComponentId"), Some("1"));
        assert_eq!(updates[0].value, TypedValue::Int(1));
        assert_eq!(updates[1].value, TypedValue::from("region-a"));
        assert_eq!(updates[2].value, TypedValue::Uint(3));
    }

    #[test]
    fn format_selector_zero_is_out_of_range() {
        let mut tree = ConfigTree::new();
        let bad = MstpConfigId {
            format_selector: 0,
            ..config()
        };
        let err = set_mstp_config_table(&mut tree, "t", &bad).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { min: 1, max: 200_000_000, .. }));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn name_and_revision_limits_are_enforced() {
        let long_name = MstpConfigId {
            configuration_name: "x".repeat(33),
            ..config()
        };
        assert!(matches!(
            long_name.validate(),
            Err(ConfigError::LengthViolation { .. })
        ));

        let revision = MstpConfigId {
            revision_level: 65_536,
            ..config()
        };
        assert!(matches!(
            revision.validate(),
            Err(ConfigError::OutOfRange { value: 65_536, .. })
        ));
        assert!(MstpConfigId {
            revision_level: 65_535,
            ..config()
        }
        .validate()
        .is_ok());
    }
}
