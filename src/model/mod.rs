//! Strongly-typed device model populated by the parser.
//!
//! Nested structures (`Switchport`, `InterfaceLayer3`) are always present and
//! simply zero-valued when the configuration does not touch them.

pub mod acl;
pub mod device;
pub mod interface;
pub mod vlan;

pub use acl::{AccessList, AclAction, AclEntry, AclMatch, AclRule, AclType, AddressSpec, PortSpec};
pub use device::{DanglingReference, Device};
pub use interface::{
    canonical_interface_name, AccessGroup, ChannelGroup, ChannelMode, Direction, Duplex, Interface,
    InterfaceLayer3, Speed, Standby, Switchport, SwitchportAccess, SwitchportMode, SwitchportTrunk,
    DEFAULT_STANDBY_PRIORITY,
};
pub use vlan::{VlanListError, VlanSet, VLAN_MAX, VLAN_MIN};
