//! Interface block parser.
//!
//! Each line of an `interface` block is matched against [`INTERFACE_DIRECTIVES`]
//! and applied to the open [`Interface`] accumulator. Later lines override
//! earlier ones; list-valued fields accumulate.

use super::keyword::{dispatch, kw, Directive, DirectiveArgs, DirectiveError};
use crate::model::vlan::{parse_vlan_id, VlanListError, VlanSet};
use crate::model::{
    AccessGroup, ChannelGroup, ChannelMode, Direction, Duplex, Interface, Speed, SwitchportMode,
    DEFAULT_STANDBY_PRIORITY,
};
use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

/// Highest HSRP group number (HSRP version 2).
const STANDBY_GROUP_MAX: u16 = 4095;

/// Name reported for `ip access-group`, used to track references.
pub(crate) const ACCESS_GROUP_DIRECTIVE: &str = "ip access-group";

/// Directives recognised inside an `interface` block.
pub(crate) static INTERFACE_DIRECTIVES: &[Directive<Interface>] = &[
    Directive {
        name: "description",
        path: &[kw::DESCRIPTION],
        apply: apply_description,
    },
    Directive {
        name: "shutdown",
        path: &[kw::SHUTDOWN],
        apply: apply_shutdown,
    },
    Directive {
        name: "speed",
        path: &[kw::SPEED],
        apply: apply_speed,
    },
    Directive {
        name: "duplex",
        path: &[kw::DUPLEX],
        apply: apply_duplex,
    },
    Directive {
        name: "switchport",
        path: &[kw::SWITCHPORT],
        apply: apply_switchport,
    },
    Directive {
        name: "switchport mode",
        path: &[kw::SWITCHPORT, kw::MODE],
        apply: apply_switchport_mode,
    },
    Directive {
        name: "switchport access vlan",
        path: &[kw::SWITCHPORT, kw::ACCESS, kw::VLAN],
        apply: apply_access_vlan,
    },
    Directive {
        name: "switchport trunk encapsulation",
        path: &[kw::SWITCHPORT, kw::TRUNK, kw::ENCAPSULATION],
        apply: apply_trunk_encapsulation,
    },
    Directive {
        name: "switchport trunk native vlan",
        path: &[kw::SWITCHPORT, kw::TRUNK, kw::NATIVE, kw::VLAN],
        apply: apply_trunk_native_vlan,
    },
    Directive {
        name: "switchport trunk allowed vlan",
        path: &[kw::SWITCHPORT, kw::TRUNK, kw::ALLOWED, kw::VLAN],
        apply: apply_trunk_allowed_vlan,
    },
    Directive {
        name: "ip address",
        path: &[kw::IP, kw::ADDRESS],
        apply: apply_ip_address,
    },
    Directive {
        name: "ip helper-address",
        path: &[kw::IP, kw::HELPER_ADDRESS],
        apply: apply_helper_address,
    },
    Directive {
        name: ACCESS_GROUP_DIRECTIVE,
        path: &[kw::IP, kw::ACCESS_GROUP],
        apply: apply_access_group,
    },
    Directive {
        name: "standby",
        path: &[kw::STANDBY],
        apply: apply_standby,
    },
    Directive {
        name: "channel-group",
        path: &[kw::CHANNEL_GROUP],
        apply: apply_channel_group,
    },
];

/// Apply one block line to the interface. Returns the directive name.
pub(crate) fn apply_line(
    iface: &mut Interface,
    content: &str,
    tokens: &[&str],
) -> Result<&'static str, DirectiveError> {
    dispatch(INTERFACE_DIRECTIVES, iface, content, tokens)
}

fn expect_no_args(args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    if args.args.is_empty() {
        Ok(())
    } else {
        Err(DirectiveError::Unmodeled)
    }
}

fn first_arg<'a>(args: &DirectiveArgs<'a>, what: &str) -> Result<&'a str, DirectiveError> {
    args.args
        .first()
        .copied()
        .ok_or_else(|| DirectiveError::malformed(format!("missing {}", what)))
}

fn parse_ipv4(token: &str) -> Result<Ipv4Addr, DirectiveError> {
    token
        .parse()
        .map_err(|_| DirectiveError::malformed(format!("invalid IPv4 address '{}'", token)))
}

fn parse_vlan(token: &str) -> Result<u16, DirectiveError> {
    parse_vlan_id(token).map_err(|e| DirectiveError::malformed(e.to_string()))
}

fn apply_description(iface: &mut Interface, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    if args.negated {
        iface.description = None;
        return Ok(());
    }
    if args.rest.is_empty() {
        return Err(DirectiveError::malformed("missing description text"));
    }
    iface.description = Some(args.rest.to_string());
    Ok(())
}

fn apply_shutdown(iface: &mut Interface, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    expect_no_args(args)?;
    iface.shutdown = !args.negated;
    Ok(())
}

fn apply_speed(iface: &mut Interface, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    if args.negated {
        iface.speed = None;
        return Ok(());
    }
    let value = first_arg(args, "speed")?;
    iface.speed = Some(value.parse::<Speed>().map_err(DirectiveError::Malformed)?);
    Ok(())
}

fn apply_duplex(iface: &mut Interface, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    if args.negated {
        iface.duplex = None;
        return Ok(());
    }
    let value = first_arg(args, "duplex mode")?;
    iface.duplex = Some(value.parse::<Duplex>().map_err(DirectiveError::Malformed)?);
    Ok(())
}

fn apply_switchport(iface: &mut Interface, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    expect_no_args(args)?;
    iface.switchport.enabled = !args.negated;
    Ok(())
}

fn apply_switchport_mode(
    iface: &mut Interface,
    args: &DirectiveArgs<'_>,
) -> Result<(), DirectiveError> {
    if args.negated {
        iface.switchport.mode = None;
        return Ok(());
    }
    let mode = match args.args {
        [mode] if kw::ACCESS.matches(mode) => SwitchportMode::Access,
        [mode] if kw::TRUNK.matches(mode) => SwitchportMode::Trunk,
        [dynamic, flavour] if kw::DYNAMIC.matches(dynamic) => {
            match flavour.to_lowercase().as_str() {
                "auto" => SwitchportMode::DynamicAuto,
                "desirable" => SwitchportMode::DynamicDesirable,
                _ => return Err(DirectiveError::Unmodeled),
            }
        }
        [] => return Err(DirectiveError::malformed("missing switchport mode")),
        // private-vlan, dot1q-tunnel and friends
        _ => return Err(DirectiveError::Unmodeled),
    };
    iface.switchport.enabled = true;
    iface.switchport.mode = Some(mode);
    Ok(())
}

fn apply_access_vlan(iface: &mut Interface, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    if args.negated {
        iface.switchport.access.vlan = None;
        return Ok(());
    }
    let vlan = parse_vlan(first_arg(args, "VLAN id")?)?;
    iface.switchport.enabled = true;
    iface.switchport.access.vlan = Some(vlan);
    Ok(())
}

fn apply_trunk_encapsulation(
    iface: &mut Interface,
    args: &DirectiveArgs<'_>,
) -> Result<(), DirectiveError> {
    if args.negated {
        iface.switchport.trunk.encapsulation = None;
        return Ok(());
    }
    let encapsulation = first_arg(args, "encapsulation")?.to_lowercase();
    iface.switchport.enabled = true;
    iface.switchport.trunk.encapsulation = Some(encapsulation);
    Ok(())
}

fn apply_trunk_native_vlan(
    iface: &mut Interface,
    args: &DirectiveArgs<'_>,
) -> Result<(), DirectiveError> {
    if args.negated {
        iface.switchport.trunk.native_vlan = None;
        return Ok(());
    }
    let vlan = parse_vlan(first_arg(args, "VLAN id")?)?;
    iface.switchport.enabled = true;
    iface.switchport.trunk.native_vlan = Some(vlan);
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum AllowedOp {
    Replace,
    Add,
    Remove,
    Except,
}

/// `switchport trunk allowed vlan [add|remove|except|all|none] <list>`.
///
/// A bare list replaces the set, `add` unions, `remove` subtracts and
/// `except` takes the complement within 1-4094. A list that fails to parse
/// leaves the set untouched.
fn apply_trunk_allowed_vlan(
    iface: &mut Interface,
    args: &DirectiveArgs<'_>,
) -> Result<(), DirectiveError> {
    let trunk = &mut iface.switchport.trunk;
    if args.negated {
        trunk.allowed_vlans = None;
        return Ok(());
    }

    let (op, list) = match args.args.split_first() {
        Some((op, list)) if kw::ADD.matches(op) => (AllowedOp::Add, list),
        Some((op, list)) if kw::REMOVE.matches(op) => (AllowedOp::Remove, list),
        Some((op, list)) if kw::EXCEPT.matches(op) => (AllowedOp::Except, list),
        Some((op, [])) if kw::ALL.matches(op) => {
            trunk.allowed_vlans = None;
            iface.switchport.enabled = true;
            return Ok(());
        }
        Some((op, [])) if kw::NONE.matches(op) => {
            trunk.allowed_vlans = Some(VlanSet::new());
            iface.switchport.enabled = true;
            return Ok(());
        }
        Some(_) => (AllowedOp::Replace, args.args),
        None => return Err(DirectiveError::VlanList("missing VLAN list".to_string())),
    };

    let list: VlanSet = join_vlan_list(list)?
        .parse()
        .map_err(|e: VlanListError| DirectiveError::VlanList(e.to_string()))?;

    let updated = match op {
        AllowedOp::Replace => list,
        AllowedOp::Add => trunk.effective_allowed_vlans().union(&list),
        AllowedOp::Remove => trunk.effective_allowed_vlans().difference(&list),
        AllowedOp::Except => list.complement(),
    };
    trunk.set_allowed_vlans(updated);
    iface.switchport.enabled = true;
    Ok(())
}

/// Rejoin a VLAN list written with spaces around its commas (`10, 20`).
///
/// Tokens not separated by a comma (`10 20`) are rejected.
fn join_vlan_list(tokens: &[&str]) -> Result<String, DirectiveError> {
    let mut joined = String::new();
    for token in tokens {
        if !joined.is_empty() && !joined.ends_with(',') && !token.starts_with(',') {
            return Err(DirectiveError::VlanList(format!(
                "missing comma before '{}'",
                token
            )));
        }
        joined.push_str(token);
    }
    Ok(joined)
}

/// `ip address <addr> <mask> [secondary]`, `ip address <addr>/<len>`, or
/// `ip address dhcp`.
fn apply_ip_address(iface: &mut Interface, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    let layer3 = &mut iface.layer3;
    if args.negated {
        layer3.ip_address = None;
        layer3.secondary_addresses.clear();
        layer3.dhcp = false;
        return Ok(());
    }

    let (network, rest) = match args.args {
        [dhcp, ..] if kw::DHCP.matches(dhcp) => {
            layer3.dhcp = true;
            layer3.ip_address = None;
            return Ok(());
        }
        [cidr, rest @ ..] if cidr.contains('/') => {
            let network: Ipv4Net = cidr
                .parse()
                .map_err(|_| DirectiveError::malformed(format!("invalid prefix '{}'", cidr)))?;
            (network, rest)
        }
        [addr, mask, rest @ ..] => {
            let addr = parse_ipv4(addr)?;
            let mask = parse_ipv4(mask)?;
            let network = Ipv4Net::with_netmask(addr, mask).map_err(|_| {
                DirectiveError::malformed(format!("non-contiguous subnet mask {}", mask))
            })?;
            (network, rest)
        }
        _ => return Err(DirectiveError::malformed("missing address or mask")),
    };

    match rest {
        [] => {
            layer3.ip_address = Some(network);
            layer3.dhcp = false;
        }
        [secondary] if kw::SECONDARY.matches(secondary) => {
            layer3.secondary_addresses.push(network);
        }
        _ => return Err(DirectiveError::Unmodeled),
    }
    Ok(())
}

/// `ip helper-address [vrf <name>|global] <addr>`; the address is the last token.
fn apply_helper_address(
    iface: &mut Interface,
    args: &DirectiveArgs<'_>,
) -> Result<(), DirectiveError> {
    let helpers = &mut iface.layer3.helper_addresses;
    let Some(last) = args.args.last() else {
        if args.negated {
            helpers.clear();
            return Ok(());
        }
        return Err(DirectiveError::malformed("missing helper address"));
    };
    let addr = parse_ipv4(last)?;
    if args.negated {
        helpers.retain(|helper| *helper != addr);
    } else {
        helpers.push(addr);
    }
    Ok(())
}

fn apply_access_group(iface: &mut Interface, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    if args.negated {
        iface.layer3.access_group = None;
        return Ok(());
    }
    match args.args {
        [name, direction] => {
            let direction = direction
                .parse::<Direction>()
                .map_err(DirectiveError::Malformed)?;
            iface.layer3.access_group = Some(AccessGroup {
                name: (*name).to_string(),
                direction,
            });
            Ok(())
        }
        [_] => Err(DirectiveError::malformed("missing direction (in|out)")),
        [] => Err(DirectiveError::malformed("missing access-list name")),
        _ => Err(DirectiveError::Unmodeled),
    }
}

/// `standby [<group>] ip [<addr>]`, `standby [<group>] priority <n>`,
/// `standby [<group>] preempt ...`. A missing group number means group 0.
fn apply_standby(iface: &mut Interface, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    let (group, rest) = match args.args.split_first() {
        Some((first, rest)) if first.bytes().all(|b| b.is_ascii_digit()) => {
            let group: u16 = first
                .parse()
                .ok()
                .filter(|group| *group <= STANDBY_GROUP_MAX)
                .ok_or_else(|| DirectiveError::malformed(format!("invalid HSRP group '{}'", first)))?;
            (group, rest)
        }
        _ => (0, args.args),
    };

    let layer3 = &mut iface.layer3;
    match rest {
        [] if args.negated => {
            layer3.remove_standby(group);
        }
        [ip, addr_args @ ..] if kw::IP.matches(ip) => {
            if args.negated {
                if let Some(standby) = layer3.standby_groups.iter_mut().find(|s| s.group == group) {
                    standby.ip_address = None;
                }
                return Ok(());
            }
            match addr_args {
                [] => {
                    layer3.standby_mut(group);
                }
                [addr] => {
                    let addr = parse_ipv4(addr)?;
                    layer3.standby_mut(group).ip_address = Some(addr);
                }
                _ => return Err(DirectiveError::Unmodeled),
            }
        }
        [priority, value_args @ ..] if kw::PRIORITY.matches(priority) => {
            if args.negated {
                if let Some(standby) = layer3.standby_groups.iter_mut().find(|s| s.group == group) {
                    standby.priority = DEFAULT_STANDBY_PRIORITY;
                }
                return Ok(());
            }
            let value = value_args
                .first()
                .ok_or_else(|| DirectiveError::malformed("missing HSRP priority"))?;
            let priority: u8 = value
                .parse()
                .map_err(|_| DirectiveError::malformed(format!("invalid HSRP priority '{}'", value)))?;
            layer3.standby_mut(group).priority = priority;
        }
        [preempt, ..] if kw::PREEMPT.matches(preempt) => {
            if args.negated {
                if let Some(standby) = layer3.standby_groups.iter_mut().find(|s| s.group == group) {
                    standby.preempt = false;
                }
                return Ok(());
            }
            layer3.standby_mut(group).preempt = true;
        }
        _ => return Err(DirectiveError::Unmodeled),
    }
    Ok(())
}

/// `channel-group <n> mode <mode>`.
fn apply_channel_group(
    iface: &mut Interface,
    args: &DirectiveArgs<'_>,
) -> Result<(), DirectiveError> {
    if args.negated {
        iface.channel_group = None;
        return Ok(());
    }
    match args.args {
        [number, mode_kw, mode] if kw::MODE.matches(mode_kw) => {
            let group_number: u16 = number.parse().map_err(|_| {
                DirectiveError::malformed(format!("invalid channel-group number '{}'", number))
            })?;
            let mode = mode.parse::<ChannelMode>().map_err(DirectiveError::Malformed)?;
            iface.channel_group = Some(ChannelGroup { group_number, mode });
            Ok(())
        }
        [_] | [_, _] => Err(DirectiveError::malformed("missing channel-group mode")),
        [] => Err(DirectiveError::malformed("missing channel-group number")),
        _ => Err(DirectiveError::Unmodeled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply_all(lines: &[&str]) -> (Interface, Vec<(usize, DirectiveError)>) {
        let mut iface = Interface::new("GigabitEthernet0/1");
        let mut errors = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if let Err(err) = apply_line(&mut iface, line, &tokens) {
                errors.push((index, err));
            }
        }
        (iface, errors)
    }

    #[test]
    fn test_basic_fields() {
        let (iface, errors) = apply_all(&[
            "description  Uplink to core ",
            "speed 1000",
            "duplex full",
            "shutdown",
        ]);
        assert!(errors.is_empty());
        assert_eq!(iface.description.as_deref(), Some("Uplink to core"));
        assert_eq!(iface.speed, Some(Speed::Mbps(1000)));
        assert_eq!(iface.duplex, Some(Duplex::Full));
        assert!(iface.shutdown);

        let (iface, _) = apply_all(&["shutdown", "no shutdown", "description x", "no description"]);
        assert!(!iface.shutdown);
        assert_eq!(iface.description, None);
    }

    #[test]
    fn test_abbreviated_trunk_directives() {
        let (iface, errors) = apply_all(&[
            "sw trunk enc dot1q",
            "sw tr native vl 99",
            "sw tr al vl 10,20-22",
            "sw mo trunk",
        ]);
        assert!(errors.is_empty());
        let trunk = &iface.switchport.trunk;
        assert!(iface.switchport.enabled);
        assert_eq!(iface.switchport.mode, Some(SwitchportMode::Trunk));
        assert_eq!(trunk.encapsulation.as_deref(), Some("dot1q"));
        assert_eq!(trunk.native_vlan, Some(99));
        assert_eq!(trunk.allowed_vlans.as_ref().unwrap().to_vec(), vec![10, 20, 21, 22]);
    }

    #[test]
    fn test_allowed_vlan_set_operations() {
        let (iface, _) = apply_all(&[
            "switchport trunk allowed vlan 10-15",
            "switchport trunk allowed vlan add 20,21",
            "switchport trunk allowed vlan remove 11-13",
        ]);
        assert_eq!(
            iface.switchport.trunk.allowed_vlans.unwrap().to_vec(),
            vec![10, 14, 15, 20, 21]
        );

        let (iface, _) = apply_all(&["switchport trunk allowed vlan except 2-4094"]);
        assert_eq!(iface.switchport.trunk.allowed_vlans.unwrap().to_vec(), vec![1]);

        let (iface, _) = apply_all(&["switchport trunk allowed vlan remove 1"]);
        let allowed = iface.switchport.trunk.allowed_vlans.unwrap();
        assert_eq!(allowed.len(), 4093);
        assert!(!allowed.contains(1));

        let (iface, _) = apply_all(&["switchport trunk allowed vlan none"]);
        assert!(iface.switchport.trunk.allowed_vlans.unwrap().is_empty());

        let (iface, _) = apply_all(&[
            "switchport trunk allowed vlan 10",
            "switchport trunk allowed vlan all",
        ]);
        assert_eq!(iface.switchport.trunk.allowed_vlans, None);
    }

    #[test]
    fn test_malformed_vlan_list_leaves_set_untouched() {
        let (iface, errors) = apply_all(&[
            "switchport trunk allowed vlan 10,20",
            "switchport trunk allowed vlan add 30-x",
        ]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].1, DirectiveError::VlanList(_)));
        assert_eq!(iface.switchport.trunk.allowed_vlans.unwrap().to_vec(), vec![10, 20]);
    }

    #[test]
    fn test_vlan_list_spacing() {
        let (iface, errors) = apply_all(&["switchport trunk allowed vlan 10, 20 ,30-31"]);
        assert!(errors.is_empty());
        assert_eq!(
            iface.switchport.trunk.allowed_vlans.unwrap().to_vec(),
            vec![10, 20, 30, 31]
        );

        let (iface, errors) = apply_all(&[
            "switchport trunk allowed vlan 5",
            "switchport trunk allowed vlan 10 20",
        ]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], (1, DirectiveError::VlanList(_))));
        assert_eq!(iface.switchport.trunk.allowed_vlans.unwrap().to_vec(), vec![5]);
    }

    #[test]
    fn test_ip_address_canonicalized_to_cidr() {
        let (iface, errors) = apply_all(&[
            "ip address 10.0.0.1 255.255.255.0",
            "ip address 10.0.1.1 255.255.255.128 secondary",
        ]);
        assert!(errors.is_empty());
        assert_eq!(iface.layer3.ip_address.unwrap().to_string(), "10.0.0.1/24");
        assert_eq!(
            iface.layer3.secondary_addresses[0].to_string(),
            "10.0.1.1/25"
        );

        let (iface, _) = apply_all(&["ip address 192.168.1.1/30"]);
        assert_eq!(iface.layer3.ip_address.unwrap().prefix_len(), 30);

        let (iface, errors) = apply_all(&["ip address 10.0.0.1 255.0.255.0"]);
        assert!(iface.layer3.ip_address.is_none());
        assert!(matches!(errors[0].1, DirectiveError::Malformed(_)));

        let (iface, _) = apply_all(&["ip address 10.0.0.1 255.255.255.0", "ip address dhcp"]);
        assert!(iface.layer3.dhcp);
        assert!(iface.layer3.ip_address.is_none());
    }

    #[test]
    fn test_helper_addresses_keep_order_and_repeats() {
        let (iface, _) = apply_all(&[
            "ip helper-address 10.1.1.1",
            "ip helper-address 10.2.2.2",
            "ip helper-address 10.1.1.1",
        ]);
        assert_eq!(
            iface.layer3.helper_addresses,
            vec![
                Ipv4Addr::new(10, 1, 1, 1),
                Ipv4Addr::new(10, 2, 2, 2),
                Ipv4Addr::new(10, 1, 1, 1)
            ]
        );
    }

    #[test]
    fn test_standby_groups_merge_by_number() {
        let (iface, errors) = apply_all(&[
            "standby 1 ip 10.0.0.1",
            "standby 2 ip 10.0.0.2",
            "standby 1 priority 110",
            "standby 1 preempt delay minimum 30",
            "standby ip 10.0.0.254",
        ]);
        assert!(errors.is_empty());
        let layer3 = &iface.layer3;
        assert_eq!(layer3.standby_groups.len(), 3);

        let first = layer3.standby(1).unwrap();
        assert_eq!(first.ip_address, Some(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(first.priority, 110);
        assert!(first.preempt);

        let second = layer3.standby(2).unwrap();
        assert_eq!(second.priority, DEFAULT_STANDBY_PRIORITY);

        assert_eq!(
            layer3.standby(0).unwrap().ip_address,
            Some(Ipv4Addr::new(10, 0, 0, 254))
        );
    }

    #[test]
    fn test_standby_unmodeled_subcommands() {
        let (iface, errors) = apply_all(&["standby 1 track 10 decrement 20", "standby version 2"]);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|(_, e)| *e == DirectiveError::Unmodeled));
        assert!(iface.layer3.standby_groups.is_empty());
    }

    #[test]
    fn test_access_group_and_channel_group() {
        let (iface, errors) = apply_all(&["ip access-group WEB in", "channel-group 5 mode active"]);
        assert!(errors.is_empty());
        assert_eq!(
            iface.layer3.access_group,
            Some(AccessGroup {
                name: "WEB".to_string(),
                direction: Direction::In
            })
        );
        assert_eq!(
            iface.channel_group,
            Some(ChannelGroup {
                group_number: 5,
                mode: ChannelMode::Active
            })
        );

        let (_, errors) = apply_all(&["ip access-group WEB sideways", "channel-group 5"]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_unmodeled_lines() {
        let (iface, errors) = apply_all(&["description kept", "ip ospf 1 area 0", "switchport port-security"]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], (1, DirectiveError::Unmodeled));
        assert_eq!(iface.description.as_deref(), Some("kept"));
    }
}
