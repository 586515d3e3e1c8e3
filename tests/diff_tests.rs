//! Integration tests for device drift detection
//!
//! These tests parse two configurations and verify:
//! - Added, removed and modified interfaces and access lists
//! - Changed-field reporting for interfaces
//! - Rule-count reporting for access lists
//! - Output ordering

use iosparse::diff::{diff_devices, ChangeType, DeviceChange, EntityKind};
use iosparse::model::Device;
use pretty_assertions::assert_eq;

fn device(text: &str) -> Device {
    iosparse::parse(text).unwrap().device
}

const INTENDED: &str = "\
hostname dist-01
interface Gi0/1
 description uplink
 switchport mode trunk
interface Gi0/2
 shutdown
interface Vlan10
 ip address 10.10.0.1 255.255.255.0
ip access-list extended WEB
 permit tcp any any eq 80
ip access-list standard MGMT
 permit 10.0.0.0 0.0.0.255
";

#[test]
fn test_no_drift() {
    let before = device(INTENDED);
    let after = device(INTENDED);
    assert!(diff_devices(&before, &after).is_empty());
}

#[test]
fn test_interface_field_changes() {
    let before = device(INTENDED);
    let after = device(
        "\
interface Gi0/1
 description uplink to core
 switchport mode trunk
 switchport trunk allowed vlan 10
interface Gi0/2
 shutdown
interface Vlan10
 ip address 10.10.0.1 255.255.255.0
ip access-list extended WEB
 permit tcp any any eq 80
ip access-list standard MGMT
 permit 10.0.0.0 0.0.0.255
",
    );

    let changes = diff_devices(&before, &after);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, EntityKind::Interface);
    assert_eq!(changes[0].name, "GigabitEthernet0/1");
    assert_eq!(changes[0].change_type, ChangeType::Modified);
    assert_eq!(changes[0].fields, vec!["description", "switchport"]);
}

#[test]
fn test_added_and_removed_entities() {
    let before = device(INTENDED);
    let after = device(
        "\
interface Gi0/1
 description uplink
 switchport mode trunk
interface Gi0/3
 shutdown
interface Vlan10
 ip address 10.10.0.1 255.255.255.0
ip access-list extended WEB
 permit tcp any any eq 80
 permit tcp any any eq 443
",
    );

    let changes = diff_devices(&before, &after);
    let summary: Vec<(EntityKind, &str, ChangeType)> = changes
        .iter()
        .map(|c| (c.kind, c.name.as_str(), c.change_type))
        .collect();
    assert_eq!(
        summary,
        vec![
            (EntityKind::Interface, "GigabitEthernet0/3", ChangeType::Added),
            (EntityKind::AccessList, "WEB", ChangeType::Modified),
            (EntityKind::Interface, "GigabitEthernet0/2", ChangeType::Removed),
            (EntityKind::AccessList, "MGMT", ChangeType::Removed),
        ]
    );

    let web = &changes[1];
    assert_eq!(web.rules_before, Some(1));
    assert_eq!(web.rules_after, Some(2));
    assert_eq!(web.fields, vec!["rules"]);

    let mgmt = &changes[3];
    assert_eq!(mgmt.rules_before, Some(1));
    assert_eq!(mgmt.rules_after, None);
}

#[test]
fn test_display_lines() {
    let before = device("interface Vlan1\n shutdown\n");
    let after = device("interface Vlan1\n no shutdown\nip access-list standard A\n permit any\n");
    let lines: Vec<String> = diff_devices(&before, &after)
        .iter()
        .map(DeviceChange::to_string)
        .collect();
    assert_eq!(lines, vec!["~ interface Vlan1 (shutdown)", "+ access-list A"]);
}
