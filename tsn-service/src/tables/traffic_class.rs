/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Default traffic-class table (802.1Q-2018 8.6.6, table 8-5) and the
//! priority regeneration table (6.9.4).

use tracing::debug;

use crate::error::ConfigError;
use crate::paths;
use crate::tree::ConfigTree;
use crate::update::{TypedValue, Update};

use super::{MAX_QUEUES, MIN_QUEUES};

fn check_queue_count(queues: u8) -> Result<(), ConfigError> {
    if !(MIN_QUEUES..=MAX_QUEUES).contains(&queues) {
        return Err(ConfigError::out_of_range(
            "number of traffic classes",
            queues,
            MIN_QUEUES.into(),
            MAX_QUEUES.into(),
        ));
    }
    Ok(())
}

/// Traffic class for each priority 0..=7 on a port with `queues` queues.
pub fn default_traffic_classes(queues: u8) -> Result<[u8; 8], ConfigError> {
    check_queue_count(queues)?;
    let mapping = match queues {
        1 => [0, 0, 0, 0, 0, 0, 0, 0],
        2 => [0, 0, 0, 0, 1, 1, 1, 1],
        3 => [0, 0, 0, 0, 1, 1, 2, 2],
        4 => [0, 0, 1, 1, 2, 2, 3, 3],
        5 => [0, 0, 1, 1, 2, 2, 3, 4],
        6 => [1, 0, 2, 2, 3, 3, 4, 5],
        7 => [1, 0, 2, 3, 4, 4, 5, 6],
        _ => [1, 0, 2, 3, 4, 5, 6, 7],
    };
    Ok(mapping)
}

/// Writes `traffic-class/priority<i>` for all eight priorities.
pub fn set_default_traffic_class_table(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
    queues: u8,
) -> Result<Vec<Update>, ConfigError> {
    let mapping = default_traffic_classes(queues)?;
    let updates = write_priority_row(tree, port, target, "traffic-class", &mapping)?;
    debug!(port, target, queues, "traffic-class table written");
    Ok(updates)
}

/// Writes the identity mapping `priority-regeneration/priority<i> = i` for
/// `i` in `0..queues`.
pub fn set_default_priority_regeneration_table(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
    queues: u8,
) -> Result<Vec<Update>, ConfigError> {
    check_queue_count(queues)?;
    let identity: Vec<u8> = (0..queues).collect();
    let updates = write_priority_row(tree, port, target, "priority-regeneration", &identity)?;
    debug!(port, target, queues, "priority regeneration table written");
    Ok(updates)
}

fn write_priority_row(
    tree: &mut ConfigTree,
    port: &str,
    target: &str,
    container: &str,
    values: &[u8],
) -> Result<Vec<Update>, ConfigError> {
    let mut anchor = paths::bridge_port(tree, port, target)?.by_name(container)?;
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| -> Result<Update, ConfigError> {
            let update = anchor
                .fork()
                .by_name(&format!("priority{i}"))?
                .set(TypedValue::Uint(value.into()))?;
            Ok(update)
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mapping_stays_below_the_queue_count() {
        for queues in MIN_QUEUES..=MAX_QUEUES {
            let mapping = default_traffic_classes(queues).unwrap();
            assert_eq!(mapping.len(), 8);
            assert!(
                mapping.iter().all(|&tc| tc < queues),
                "{queues} queues: {mapping:?}"
            );
        }
    }

    #[test]
    fn six_queues_swap_priorities_zero_and_one() {
        assert_eq!(default_traffic_classes(6).unwrap(), [1, 0, 2, 2, 3, 3, 4, 5]);
    }

    #[test]
    fn every_queue_count_matches_the_standard_row() {
        let rows: [(u8, [u8; 8]); 8] = [
            (1, [0, 0, 0, 0, 0, 0, 0, 0]),
            (2, [0, 0, 0, 0, 1, 1, 1, 1]),
            (3, [0, 0, 0, 0, 1, 1, 2, 2]),
            (4, [0, 0, 1, 1, 2, 2, 3, 3]),
            (5, [0, 0, 1, 1, 2, 2, 3, 4]),
            (6, [1, 0, 2, 2, 3, 3, 4, 5]),
            (7, [1, 0, 2, 3, 4, 4, 5, 6]),
            (8, [1, 0, 2, 3, 4, 5, 6, 7]),
        ];
        for (queues, row) in rows {
            assert_eq!(default_traffic_classes(queues).unwrap(), row, "{queues} queues");
        }
    }

    #[test]
    fn queue_count_outside_one_to_eight_writes_nothing() {
        let mut tree = ConfigTree::new();
        for queues in [0, 9] {
            let err = set_default_traffic_class_table(&mut tree, "p1", "t", queues).unwrap_err();
            assert!(matches!(err, ConfigError::OutOfRange { min: 1, max: 8, .. }));
            let err = set_default_priority_regeneration_table(&mut tree, "p1", "t", queues).unwrap_err();
            assert!(matches!(err, ConfigError::OutOfRange { .. }));
        }
        assert_eq!(tree.node_count(), 1, "rejected input must not touch the tree");
    }

    #[test]
    fn traffic_class_table_writes_eight_priorities() {
        let mut tree = ConfigTree::new();
        let updates = set_default_traffic_class_table(&mut tree, "p1", "t", 3).unwrap();
        assert_eq!(updates.len(), 8);
        assert_eq!(updates[7].leaf(), Some("priority7"));
        assert_eq!(updates[7].value, TypedValue::Uint(2));
        assert_eq!(updates[0].path.segments()[3].name(), "traffic-class");
    }

    #[test]
    fn regeneration_table_is_identity_up_to_queue_count() {
        let mut tree = ConfigTree::new();
        let updates = set_default_priority_regeneration_table(&mut tree, "p1", "t", 4).unwrap();
        assert_eq!(updates.len(), 4);
        for (i, u) in updates.iter().enumerate() {
            assert_eq!(u.path.segments()[3].name(), "priority-regeneration");
            assert_eq!(u.leaf(), Some(format!("priority{i}").as_str()));
            assert_eq!(u.value, TypedValue::Uint(i as u64));
        }
    }
}
