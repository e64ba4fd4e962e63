//! Leaf setters for individual bridge features.
//!
//! Each setter validates all of its parameters first and only then
//! descends, so a returned error means the tree was not modified.

pub mod mstp;
pub mod psfp;
pub mod vlan;
