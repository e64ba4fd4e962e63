//! IEEE 802.1Q lookup tables derived from fixed standard defaults.
//!
//! | Module | Table | Reference |
//! |---|---|---|
//! | [`pcp`] | PCP encoding / decoding | 802.1Q-2018 6.9.3 |
//! | [`traffic_class`] | Default traffic-class table, priority regeneration | 802.1Q-2018 8.6.6, 6.9.4 |
//!
//! Every generator validates its input (or computes its full table) before
//! the first descent, so an `Err` leaves the [`ConfigTree`](crate::tree::ConfigTree)
//! untouched and produces no updates.

pub mod pcp;
pub mod traffic_class;

pub use pcp::{set_default_pcp_decoding_table, set_default_pcp_encoding_table, PcpType};
pub use traffic_class::{
    default_traffic_classes, set_default_priority_regeneration_table,
    set_default_traffic_class_table,
};

/// Highest 802.1Q priority / PCP value.
pub const MAX_PRIORITY: u8 = 7;

/// Supported range of traffic classes (queues) per port.
pub const MIN_QUEUES: u8 = 1;
pub const MAX_QUEUES: u8 = 8;
