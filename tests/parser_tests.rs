//! Integration tests for the iosparse configuration parser
//!
//! These tests verify running-config parsing through the public API:
//! - Block recognition with and without indentation
//! - Interface directives (switchport, layer 3, HSRP, port-channel)
//! - Named and legacy access lists, numbering and ordering
//! - Warning reporting for unmodeled and malformed lines
//! - Fatal input errors
//! - The end-to-end uplink/ACL scenario

use iosparse::config::ParserConfig;
use iosparse::model::{
    AccessGroup, AclAction, AclType, AddressSpec, ChannelGroup, ChannelMode, Device, Direction,
    PortSpec, Speed, Standby, SwitchportMode,
};
use iosparse::warning::WarningKind;
use iosparse::{InputError, ParseOutput, Parser};
use pretty_assertions::assert_eq;
use std::net::Ipv4Addr;

fn parse(text: &str) -> ParseOutput {
    iosparse::parse(text).unwrap()
}

// ============================================================================
// Core Properties
// ============================================================================

#[test]
fn test_parse_is_idempotent() {
    let text = include_str!("fixtures/access_switch.cfg");
    let first = parse(text);
    let second = parse(text);
    assert_eq!(first, second);
}

#[test]
fn test_acl_rule_order_follows_file_order() {
    let output = parse(
        "ip access-list extended ORDER\n 10 permit ip any any\n 20 deny tcp any any\n 30 deny udp any any\n",
    );
    let acl = output.device.access_list("ORDER").unwrap();
    let numbers: Vec<u32> = acl.rules.iter().map(|rule| rule.number).collect();
    assert_eq!(numbers, vec![10, 20, 30]);

    let reordered = parse(
        "ip access-list extended ORDER\n 30 deny udp any any\n 10 permit ip any any\n 20 deny tcp any any\n",
    );
    let acl = reordered.device.access_list("ORDER").unwrap();
    let numbers: Vec<u32> = acl.rules.iter().map(|rule| rule.number).collect();
    assert_eq!(numbers, vec![30, 10, 20]);
    assert_eq!(acl.rules[0].protocol(), Some("udp"));
    assert!(reordered
        .warnings
        .iter()
        .any(|w| w.kind == WarningKind::NonMonotonicSequence { previous: 30, current: 10 }));
}

#[test]
fn test_auto_numbering() {
    let output = parse(
        "ip access-list standard MGMT\n permit host 10.0.0.1\n permit host 10.0.0.2\n remark fallback\n deny any\n",
    );
    let acl = output.device.access_list("MGMT").unwrap();
    let numbers: Vec<u32> = acl.rules.iter().map(|rule| rule.number).collect();
    assert_eq!(numbers, vec![10, 20, 30, 40]);
}

#[test]
fn test_auto_numbering_uses_configured_step() {
    let parser = Parser::with_config(ParserConfig {
        acl_sequence_step: 5,
        ..ParserConfig::default()
    });
    let output = parser
        .parse("ip access-list standard MGMT\n permit any\n permit any\n")
        .unwrap();
    let acl = output.device.access_list("MGMT").unwrap();
    assert_eq!(acl.rules[1].number, 10);
}

#[test]
fn test_vlan_range_expansion() {
    let output = parse("interface Gi0/2\n switchport trunk allowed vlan 10,12-14\n");
    let trunk = &output.device.interfaces[0].switchport.trunk;
    assert_eq!(
        trunk.allowed_vlans.as_ref().unwrap().to_vec(),
        vec![10, 12, 13, 14]
    );
}

#[test]
fn test_standby_priority_defaults_to_100() {
    let output = parse("interface Vlan10\n standby 1 ip 10.0.0.1\n");
    let layer3 = &output.device.interfaces[0].layer3;
    assert_eq!(
        layer3.standby_groups,
        vec![Standby {
            group: 1,
            ip_address: Some(Ipv4Addr::new(10, 0, 0, 1)),
            priority: 100,
            preempt: false,
        }]
    );
}

#[test]
fn test_interface_redefinition_is_cumulative() {
    let output = parse(
        "interface Gi0/1\n description first\n!\nhostname sw1\n!\ninterface GigabitEthernet0/1\n speed 100\n",
    );
    assert_eq!(output.device.interfaces.len(), 1);
    let iface = &output.device.interfaces[0];
    assert_eq!(iface.name, "GigabitEthernet0/1");
    assert_eq!(iface.description.as_deref(), Some("first"));
    assert_eq!(iface.speed, Some(Speed::Mbps(100)));
}

#[test]
fn test_unmodeled_line_is_tolerated() {
    let output = parse(
        "interface Gi0/1\n description Uplink\n ip ospf 1 area 0\n shutdown\n",
    );
    let iface = &output.device.interfaces[0];
    assert_eq!(iface.description.as_deref(), Some("Uplink"));
    assert!(iface.shutdown);

    assert_eq!(output.warnings.len(), 1);
    let warning = &output.warnings[0];
    assert_eq!(warning.line, 3);
    assert_eq!(warning.text, "ip ospf 1 area 0");
    assert_eq!(warning.kind, WarningKind::UnmodeledDirective);
}

#[test]
fn test_end_to_end_scenario() {
    let text = "\
interface GigabitEthernet0/1
 description Uplink
 switchport trunk encapsulation dot1q
 switchport trunk allowed vlan 10,20-22
!
ip access-list extended BLOCK_TELNET
 10 deny tcp any any eq 23
 20 permit ip any any
";
    let output = parse(text);
    assert!(output.warnings.is_empty(), "{:?}", output.warnings);

    let device = &output.device;
    assert_eq!(device.interfaces.len(), 1);
    let iface = &device.interfaces[0];
    assert_eq!(iface.name, "GigabitEthernet0/1");
    assert_eq!(iface.description.as_deref(), Some("Uplink"));
    assert_eq!(iface.switchport.trunk.encapsulation.as_deref(), Some("dot1q"));
    assert_eq!(
        iface.switchport.trunk.allowed_vlans.as_ref().unwrap().to_vec(),
        vec![10, 20, 21, 22]
    );

    assert_eq!(device.access_lists.len(), 1);
    let acl = &device.access_lists[0];
    assert_eq!(acl.name, "BLOCK_TELNET");
    assert_eq!(acl.acl_type, AclType::Extended);
    assert_eq!(acl.rules.len(), 2);

    let deny = acl.rules[0].matcher().unwrap();
    assert_eq!(acl.rules[0].number, 10);
    assert_eq!(deny.action, AclAction::Deny);
    assert_eq!(deny.protocol.as_deref(), Some("tcp"));
    assert_eq!(deny.source, AddressSpec::Any);
    assert_eq!(deny.destination, Some(AddressSpec::Any));
    assert_eq!(deny.destination_port, Some(PortSpec("eq 23".to_string())));

    assert_eq!(acl.rules[1].number, 20);
    assert_eq!(acl.rules[1].action(), Some(AclAction::Permit));
}

// ============================================================================
// Block Scanning
// ============================================================================

#[test]
fn test_unindented_block_continues_until_foreign_line() {
    let output = parse("interface Vlan10\nip address 10.0.0.1 255.255.255.0\nno shutdown\nip routing\n");
    let iface = output.device.interface("Vlan10").unwrap();
    assert_eq!(iface.layer3.ip_address.unwrap().to_string(), "10.0.0.1/24");
    assert!(output.warnings.is_empty());
}

#[test]
fn test_flat_interface_keeps_lines_after_unmodeled_one() {
    let output = parse(
        "interface GigabitEthernet0/1\ndescription Uplink\nip ospf 1 area 0\nshutdown\nspeed 100\n",
    );
    let iface = &output.device.interfaces[0];
    assert_eq!(iface.description.as_deref(), Some("Uplink"));
    assert!(iface.shutdown);
    assert_eq!(iface.speed, Some(Speed::Mbps(100)));

    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].line, 3);
    assert_eq!(output.warnings[0].kind, WarningKind::UnmodeledDirective);
}

#[test]
fn test_flat_access_list_keeps_rules_after_unmodeled_one() {
    let output = parse(
        "ip access-list extended WEB\npermit tcp any any eq 80\nstatistics per-entry\ndeny ip any any\nhostname edge1\n",
    );
    let acl = output.device.access_list("WEB").unwrap();
    assert_eq!(acl.rules.len(), 2);
    assert_eq!(acl.rules[1].number, 20);
    assert_eq!(acl.rules[1].action(), Some(AclAction::Deny));
    assert_eq!(output.device.hostname.as_deref(), Some("edge1"));

    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].line, 3);
    assert_eq!(output.warnings[0].text, "statistics per-entry");
}

#[test]
fn test_flat_block_closed_by_global_command() {
    let output = parse(
        "interface Vlan10\nshutdown\nno ip domain-lookup\nshutdown\ninterface Vlan20\nspanning-tree portfast\nno shutdown\n",
    );
    assert!(output.device.interface("Vlan10").unwrap().shutdown);
    assert!(!output.device.interface("Vlan20").unwrap().shutdown);
    let lines: Vec<usize> = output.warnings.iter().map(|w| w.line).collect();
    assert_eq!(lines, vec![6]);
}

#[test]
fn test_trunk_allowed_vlans_without_commas_rejected() {
    let output = parse("interface Gi0/1\n switchport trunk allowed vlan 10 20\n");
    assert_eq!(output.device.interfaces[0].switchport.trunk.allowed_vlans, None);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].kind, WarningKind::MalformedVlanList);
}

#[test]
fn test_multi_port_eq_in_both_positions() {
    let output = parse(
        "ip access-list extended WEB\n 10 permit tcp any any eq 80 443\n 20 permit tcp any eq 80 443 any\n",
    );
    assert!(output.warnings.is_empty(), "{:?}", output.warnings);
    let acl = output.device.access_list("WEB").unwrap();
    let dst = acl.rules[0].matcher().unwrap();
    assert_eq!(dst.destination_port, Some(PortSpec("eq 80 443".to_string())));
    assert!(dst.options.is_empty());
    let src = acl.rules[1].matcher().unwrap();
    assert_eq!(src.source_port, Some(PortSpec("eq 80 443".to_string())));
    assert_eq!(src.destination, Some(AddressSpec::Any));
}

#[test]
fn test_etx_banner_accepted() {
    let output = parse("banner motd \u{3}\nNo unauthorized access\n\u{3}\nhostname R1\n");
    assert_eq!(output.device.hostname.as_deref(), Some("R1"));
    assert!(output.warnings.is_empty());
}

#[test]
fn test_exit_and_end_close_blocks() {
    let output = parse(
        "interface Gi0/1\n shutdown\n exit\nip access-list standard A\n permit any\nend\n",
    );
    assert!(output.device.interfaces[0].shutdown);
    assert_eq!(output.device.access_lists[0].rules.len(), 1);
}

#[test]
fn test_banner_text_is_not_parsed() {
    let output = parse(
        "banner motd ^C\ninterface Gi0/9\n description fake\n^C\ninterface Gi0/1\n description real\n",
    );
    assert_eq!(output.device.interfaces.len(), 1);
    assert_eq!(output.device.interfaces[0].name, "GigabitEthernet0/1");
}

#[test]
fn test_hostname() {
    let output = parse("version 15.2\nhostname dist-sw-01\n");
    assert_eq!(output.device.hostname.as_deref(), Some("dist-sw-01"));
}

#[test]
fn test_interface_names_kept_as_written_when_not_expanding() {
    let parser = Parser::with_config(ParserConfig {
        expand_interface_names: false,
        ..ParserConfig::default()
    });
    let output = parser.parse("interface gi0/1\n shutdown\ninterface Gi0/1\n description x\n").unwrap();
    assert_eq!(output.device.interfaces.len(), 1);
    assert_eq!(output.device.interfaces[0].name, "gi0/1");
}

// ============================================================================
// Interface Directives
// ============================================================================

#[test]
fn test_access_port() {
    let output = parse(
        "interface FastEthernet0/5\n switchport mode access\n switchport access vlan 30\n speed auto\n duplex half\n",
    );
    let iface = &output.device.interfaces[0];
    assert!(iface.switchport.enabled);
    assert_eq!(iface.switchport.mode, Some(SwitchportMode::Access));
    assert_eq!(iface.switchport.access.vlan, Some(30));
    assert_eq!(iface.speed, Some(Speed::Auto));
    assert!(!iface.is_trunk());
}

#[test]
fn test_no_switchport_disables() {
    let output = parse("interface Gi0/1\n switchport\n no switchport\n ip address 10.0.0.1 255.255.255.252\n");
    let iface = &output.device.interfaces[0];
    assert!(!iface.switchport.enabled);
    assert_eq!(iface.layer3.ip_address.unwrap().prefix_len(), 30);
}

#[test]
fn test_svi_with_hsrp_and_helpers() {
    let text = "\
interface Vlan20
 ip address 10.20.0.2 255.255.255.0
 ip helper-address 10.1.1.10
 ip helper-address 10.1.1.11
 standby 20 ip 10.20.0.1
 standby 20 priority 120
 standby 20 preempt
 standby 21 ip 10.20.0.254
 ip access-group USERS in
!
ip access-list extended USERS
 permit ip 10.20.0.0 0.0.0.255 any
";
    let output = parse(text);
    assert!(output.warnings.is_empty(), "{:?}", output.warnings);
    let layer3 = &output.device.interfaces[0].layer3;
    assert_eq!(
        layer3.helper_addresses,
        vec![Ipv4Addr::new(10, 1, 1, 10), Ipv4Addr::new(10, 1, 1, 11)]
    );
    assert_eq!(layer3.standby_groups.len(), 2);
    let primary = layer3.standby(20).unwrap();
    assert_eq!(primary.priority, 120);
    assert!(primary.preempt);
    assert_eq!(layer3.standby(21).unwrap().priority, 100);
    assert_eq!(
        layer3.access_group,
        Some(AccessGroup {
            name: "USERS".to_string(),
            direction: Direction::In,
        })
    );
}

#[test]
fn test_port_channel_members() {
    let text = "\
interface Gi1/0/1
 channel-group 1 mode active
interface Gi1/0/2
 channel-group 1 mode active
interface Gi1/0/3
 channel-group 2 mode desirable
";
    let output = parse(text);
    let members = output.device.port_channel_members(1);
    assert_eq!(members.len(), 2);
    assert_eq!(
        output.device.interface("Gi1/0/3").unwrap().channel_group,
        Some(ChannelGroup {
            group_number: 2,
            mode: ChannelMode::Desirable,
        })
    );
}

#[test]
fn test_malformed_vlan_list_warns() {
    let output = parse(
        "interface Gi0/1\n switchport trunk allowed vlan 10,20\n switchport trunk allowed vlan add 5000\n",
    );
    let trunk = &output.device.interfaces[0].switchport.trunk;
    assert_eq!(trunk.allowed_vlans.as_ref().unwrap().to_vec(), vec![10, 20]);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].kind, WarningKind::MalformedVlanList);
    assert_eq!(output.warnings[0].line, 3);
}

#[test]
fn test_malformed_ip_address_warns() {
    let output = parse("interface Vlan1\n ip address 10.0.0.1\n");
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].code(), "malformed_directive");
    assert!(output.device.interfaces[0].layer3.ip_address.is_none());
}

// ============================================================================
// Access Lists
// ============================================================================

#[test]
fn test_legacy_numbered_lists() {
    let text = "\
access-list 10 remark management hosts
access-list 10 permit 192.168.1.10
access-list 10 permit 192.168.2.0 0.0.0.255
access-list 110 deny tcp any host 10.0.0.5 eq 22 log
access-list 110 permit ip any any
";
    let output = parse(text);
    assert!(output.warnings.is_empty(), "{:?}", output.warnings);

    let standard = output.device.access_list("10").unwrap();
    assert_eq!(standard.acl_type, AclType::Standard);
    assert_eq!(standard.rules.len(), 3);
    assert_eq!(standard.rules[0].remark(), Some("management hosts"));
    assert_eq!(
        standard.rules[1].matcher().unwrap().source,
        AddressSpec::Host(Ipv4Addr::new(192, 168, 1, 10))
    );

    let extended = output.device.access_list("110").unwrap();
    assert_eq!(extended.acl_type, AclType::Extended);
    let rule = extended.rules[0].matcher().unwrap();
    assert_eq!(
        rule.destination,
        Some(AddressSpec::Host(Ipv4Addr::new(10, 0, 0, 5)))
    );
    assert_eq!(rule.options, vec!["log".to_string()]);
}

#[test]
fn test_wildcard_masks_stored_verbatim() {
    let output = parse("ip access-list standard ODD\n permit 10.0.0.1 0.0.255.0\n");
    let rule = output.device.access_lists[0].rules[0].matcher().unwrap();
    assert_eq!(
        rule.source,
        AddressSpec::Network {
            address: Ipv4Addr::new(10, 0, 0, 1),
            wildcard: Ipv4Addr::new(0, 0, 255, 0),
        }
    );
}

#[test]
fn test_malformed_acl_rule_warns_and_continues() {
    let output = parse(
        "ip access-list extended WEB\n 10 permit tcp any\n 20 permit tcp any any eq 443\n",
    );
    let acl = output.device.access_list("WEB").unwrap();
    assert_eq!(acl.rules.len(), 1);
    assert_eq!(acl.rules[0].number, 20);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].line, 2);
}

#[test]
fn test_acl_type_mismatch_warns() {
    let output = parse(
        "ip access-list standard X\n permit any\nip access-list extended X\n permit ip any any\n",
    );
    let acl = output.device.access_list("X").unwrap();
    assert_eq!(acl.acl_type, AclType::Standard);
    assert_eq!(
        output.warnings[0].kind,
        WarningKind::AclTypeMismatch {
            name: "X".to_string(),
            existing: "standard".to_string(),
        }
    );
}

#[test]
fn test_dangling_access_group() {
    let output = parse("interface Vlan5\n ip access-group GHOST out\n");
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(
        output.warnings[0].kind,
        WarningKind::DanglingAccessGroup {
            interface: "Vlan5".to_string(),
            acl: "GHOST".to_string(),
        }
    );
    assert_eq!(output.device.dangling_access_groups().len(), 1);

    let quiet = Parser::with_config(ParserConfig {
        report_dangling_access_groups: false,
        ..ParserConfig::default()
    })
    .parse("interface Vlan5\n ip access-group GHOST out\n")
    .unwrap();
    assert!(!quiet.has_warnings());
}

// ============================================================================
// Fatal Errors and Batches
// ============================================================================

#[test]
fn test_binary_input_is_fatal() {
    let err = iosparse::parse("hostname R1\n\u{1}\u{2}\n").unwrap_err();
    assert_eq!(err, InputError::BinaryContent { line: 2, byte: 1 });
    assert!(iosparse::parse_bytes(&[0x68, 0xff, 0x0a]).is_err());
}

#[test]
fn test_batch_parsing() {
    let configs = vec![
        "hostname a\ninterface Gi0/1\n shutdown\n".to_string(),
        "hostname b\n".to_string(),
    ];
    let results = Parser::new().parse_batch(&configs);
    let devices: Vec<Device> = results
        .into_iter()
        .map(|result| result.unwrap().device)
        .collect();
    assert_eq!(devices[0].hostname.as_deref(), Some("a"));
    assert_eq!(devices[0].interfaces.len(), 1);
    assert_eq!(devices[1].hostname.as_deref(), Some("b"));
}

#[test]
fn test_access_switch_fixture() {
    let output = parse(include_str!("fixtures/access_switch.cfg"));
    let device = &output.device;
    assert_eq!(device.hostname.as_deref(), Some("acc-sw-01"));
    assert_eq!(device.interfaces.len(), 5);

    let uplink = device.interface("Gi1/0/48").unwrap();
    assert!(uplink.is_trunk());
    assert_eq!(uplink.switchport.trunk.native_vlan, Some(999));
    assert!(uplink.carries_vlan(30));
    assert!(!uplink.carries_vlan(31));

    let svi = device.interface("Vlan30").unwrap();
    assert_eq!(svi.layer3.standby(0).unwrap().ip_address, Some(Ipv4Addr::new(10, 30, 0, 1)));

    assert_eq!(device.access_lists.len(), 2);
    assert_eq!(
        output
            .warnings
            .iter()
            .map(|w| w.code())
            .collect::<Vec<_>>(),
        vec!["unmodeled_directive"]
    );
}

#[test]
fn test_parse_with_trace_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("iosparse=trace"))
        .with_test_writer()
        .try_init();

    let output = parse(include_str!("fixtures/access_switch.cfg"));
    assert_eq!(output.device.interfaces.len(), 5);
}
