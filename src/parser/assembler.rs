//! Device assembler.
//!
//! Owns the accumulators the scanner mutates. Interfaces and access lists
//! are keyed by identity in insertion-ordered maps so a re-opened block
//! mutates the existing entity and output order is first appearance.

use crate::model::{canonical_interface_name, AccessList, AclType, Device, Interface};
use crate::warning::{ParseWarning, WarningKind};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Where an interface's access-group was set.
#[derive(Debug, Clone)]
struct Reference {
    line: usize,
    text: String,
}

#[derive(Debug, Default)]
pub(crate) struct Assembler {
    hostname: Option<String>,
    /// Keyed by canonical interface name
    interfaces: IndexMap<String, Interface>,
    /// Keyed by ACL name; standard and extended lists share one namespace
    access_lists: IndexMap<String, AccessList>,
    /// Last `ip access-group` line per interface index
    access_groups: HashMap<usize, Reference>,
}

impl Assembler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_hostname(&mut self, hostname: &str) {
        self.hostname = Some(hostname.to_string());
    }

    /// Open or re-open an interface, returning its index.
    pub(crate) fn open_interface(&mut self, name: &str, expand: bool) -> usize {
        let key = canonical_interface_name(name);
        let entry = self.interfaces.entry(key);
        let index = entry.index();
        let display = if expand { entry.key().clone() } else { name.to_string() };
        entry.or_insert_with(|| Interface::new(display));
        index
    }

    pub(crate) fn interface_mut(&mut self, index: usize) -> Option<&mut Interface> {
        self.interfaces.get_index_mut(index).map(|(_, iface)| iface)
    }

    /// Open or re-open an access list.
    ///
    /// Returns the list index and, when the list already exists with a
    /// different type, that existing type. The existing type is kept.
    pub(crate) fn open_access_list(
        &mut self,
        name: &str,
        acl_type: AclType,
    ) -> (usize, Option<AclType>) {
        let entry = self.access_lists.entry(name.to_string());
        let index = entry.index();
        let acl = entry.or_insert_with(|| AccessList::new(name, acl_type));
        let mismatch = (acl.acl_type != acl_type).then_some(acl.acl_type);
        (index, mismatch)
    }

    pub(crate) fn access_list_mut(&mut self, index: usize) -> Option<&mut AccessList> {
        self.access_lists.get_index_mut(index).map(|(_, acl)| acl)
    }

    /// Remember the line that set an interface's access-group.
    pub(crate) fn record_access_group(&mut self, index: usize, line: usize, text: &str) {
        self.access_groups.insert(
            index,
            Reference {
                line,
                text: text.to_string(),
            },
        );
    }

    /// Build the device. Dangling access-group warnings are appended to
    /// `warnings` when `report_dangling` is set.
    pub(crate) fn finish(self, report_dangling: bool, warnings: &mut Vec<ParseWarning>) -> Device {
        if report_dangling {
            for (index, iface) in self.interfaces.values().enumerate() {
                let Some(group) = &iface.layer3.access_group else {
                    continue;
                };
                if self.access_lists.contains_key(&group.name) {
                    continue;
                }
                let (line, text) = self
                    .access_groups
                    .get(&index)
                    .map_or((0, ""), |reference| (reference.line, reference.text.as_str()));
                warnings.push(ParseWarning::new(
                    line,
                    text,
                    WarningKind::DanglingAccessGroup {
                        interface: iface.name.clone(),
                        acl: group.name.clone(),
                    },
                ));
            }
        }

        Device {
            hostname: self.hostname,
            interfaces: self.interfaces.into_values().collect(),
            access_lists: self.access_lists.into_values().collect(),
        }
    }
}
