//! Drift detection between two parsed devices.
//!
//! Compares interfaces (by canonical name) and access lists (by name) and
//! reports what was added, removed or modified. Useful for checking a running
//! configuration against an intended one.
//!
//! # Example
//!
//! ```rust
//! use iosparse::diff::{diff_devices, ChangeType};
//!
//! let before = iosparse::parse("interface Gi0/1\n shutdown\n").unwrap().device;
//! let after = iosparse::parse("interface Gi0/1\n no shutdown\n").unwrap().device;
//!
//! let changes = diff_devices(&before, &after);
//! assert_eq!(changes[0].change_type, ChangeType::Modified);
//! assert_eq!(changes[0].fields, vec!["shutdown"]);
//! ```

use crate::model::{canonical_interface_name, AccessList, Device, Interface};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

/// What kind of entity changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Interface,
    AccessList,
}

/// One difference between two devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceChange {
    /// Entity kind
    pub kind: EntityKind,
    /// Interface or ACL name, as spelled in the newer device when present
    pub name: String,
    /// Type of change
    pub change_type: ChangeType,
    /// Changed top-level fields, for modifications
    pub fields: Vec<String>,
    /// ACL rule count before the change
    pub rules_before: Option<usize>,
    /// ACL rule count after the change
    pub rules_after: Option<usize>,
}

impl DeviceChange {
    fn new(kind: EntityKind, name: &str, change_type: ChangeType) -> Self {
        Self {
            kind,
            name: name.to_string(),
            change_type,
            fields: Vec::new(),
            rules_before: None,
            rules_after: None,
        }
    }
}

impl std::fmt::Display for DeviceChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            EntityKind::Interface => "interface",
            EntityKind::AccessList => "access-list",
        };
        match self.change_type {
            ChangeType::Added => write!(f, "+ {} {}", kind, self.name),
            ChangeType::Removed => write!(f, "- {} {}", kind, self.name),
            ChangeType::Modified => {
                write!(f, "~ {} {} ({})", kind, self.name, self.fields.join(", "))
            }
        }
    }
}

/// Top-level interface fields that differ.
fn interface_fields(before: &Interface, after: &Interface) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if before.description != after.description {
        fields.push("description");
    }
    if before.shutdown != after.shutdown {
        fields.push("shutdown");
    }
    if before.speed != after.speed {
        fields.push("speed");
    }
    if before.duplex != after.duplex {
        fields.push("duplex");
    }
    if before.switchport != after.switchport {
        fields.push("switchport");
    }
    if before.layer3 != after.layer3 {
        fields.push("layer3");
    }
    if before.channel_group != after.channel_group {
        fields.push("channel_group");
    }
    fields
}

fn access_list_fields(before: &AccessList, after: &AccessList) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if before.acl_type != after.acl_type {
        fields.push("type");
    }
    if before.rules != after.rules {
        fields.push("rules");
    }
    fields
}

/// Compare two devices.
///
/// Added and modified entities come first, interfaces then access lists, in
/// the order of `after`; removals follow in the order of `before`.
pub fn diff_devices(before: &Device, after: &Device) -> Vec<DeviceChange> {
    let mut changes = Vec::new();

    let before_interfaces: HashMap<String, &Interface> = before
        .interfaces
        .iter()
        .map(|iface| (canonical_interface_name(&iface.name), iface))
        .collect();
    let before_acls: HashMap<&str, &AccessList> = before
        .access_lists
        .iter()
        .map(|acl| (acl.name.as_str(), acl))
        .collect();

    for iface in &after.interfaces {
        match before_interfaces.get(&canonical_interface_name(&iface.name)) {
            Some(old) => {
                let fields = interface_fields(old, iface);
                if !fields.is_empty() {
                    let mut change =
                        DeviceChange::new(EntityKind::Interface, &iface.name, ChangeType::Modified);
                    change.fields = fields.into_iter().map(String::from).collect();
                    changes.push(change);
                }
            }
            None => changes.push(DeviceChange::new(
                EntityKind::Interface,
                &iface.name,
                ChangeType::Added,
            )),
        }
    }

    for acl in &after.access_lists {
        let mut change = match before_acls.get(acl.name.as_str()) {
            Some(old) => {
                let fields = access_list_fields(old, acl);
                if fields.is_empty() {
                    continue;
                }
                let mut change =
                    DeviceChange::new(EntityKind::AccessList, &acl.name, ChangeType::Modified);
                change.fields = fields.into_iter().map(String::from).collect();
                change.rules_before = Some(old.rules.len());
                change
            }
            None => DeviceChange::new(EntityKind::AccessList, &acl.name, ChangeType::Added),
        };
        change.rules_after = Some(acl.rules.len());
        changes.push(change);
    }

    // Removals
    for iface in &before.interfaces {
        let key = canonical_interface_name(&iface.name);
        if !after
            .interfaces
            .iter()
            .any(|new| canonical_interface_name(&new.name) == key)
        {
            changes.push(DeviceChange::new(
                EntityKind::Interface,
                &iface.name,
                ChangeType::Removed,
            ));
        }
    }
    for acl in &before.access_lists {
        if after.access_list(&acl.name).is_none() {
            let mut change =
                DeviceChange::new(EntityKind::AccessList, &acl.name, ChangeType::Removed);
            change.rules_before = Some(acl.rules.len());
            changes.push(change);
        }
    }

    changes
}
