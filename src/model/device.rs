//! The parsed device: the single value a parse produces.

use super::acl::AccessList;
use super::interface::{canonical_interface_name, Interface};
use serde::{Deserialize, Serialize};

/// A device's modeled configuration.
///
/// Interfaces and access lists appear in the order they were first seen in
/// the configuration text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Configured hostname
    pub hostname: Option<String>,
    /// Interfaces, unique by name
    pub interfaces: Vec<Interface>,
    /// Access lists, unique by name
    pub access_lists: Vec<AccessList>,
}

/// An interface whose access-group names an ACL the device does not define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    /// Interface name
    pub interface: String,
    /// Missing ACL name
    pub acl: String,
}

impl Device {
    /// Look up an interface; abbreviated names (`Gi0/1`) are accepted.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|iface| iface.name == name).or_else(|| {
            let canonical = canonical_interface_name(name);
            self.interfaces
                .iter()
                .find(|iface| canonical_interface_name(&iface.name) == canonical)
        })
    }

    /// Look up an access list by name (or number, for numbered lists).
    pub fn access_list(&self, name: &str) -> Option<&AccessList> {
        self.access_lists.iter().find(|acl| acl.name == name)
    }

    /// Interfaces bundled into port-channel `group`.
    pub fn port_channel_members(&self, group: u16) -> Vec<&Interface> {
        self.interfaces
            .iter()
            .filter(|iface| {
                iface
                    .channel_group
                    .is_some_and(|channel| channel.group_number == group)
            })
            .collect()
    }

    /// Access-group references to access lists that are not defined.
    pub fn dangling_access_groups(&self) -> Vec<DanglingReference> {
        self.interfaces
            .iter()
            .filter_map(|iface| {
                let group = iface.layer3.access_group.as_ref()?;
                if self.access_list(&group.name).is_some() {
                    return None;
                }
                Some(DanglingReference {
                    interface: iface.name.clone(),
                    acl: group.name.clone(),
                })
            })
            .collect()
    }
}
