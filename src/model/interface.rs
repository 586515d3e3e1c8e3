//! Interface model: switchport, layer-3, HSRP and port-channel state.

use super::vlan::{VlanSet, VLAN_MAX, VLAN_MIN};
use ipnet::Ipv4Net;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// HSRP priority applied when a group never sets one explicitly.
pub const DEFAULT_STANDBY_PRIORITY: u8 = 100;

/// Splits an interface name into its type and its slot/port identifier.
static INTERFACE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z-]*?)\s*(\d[\d/.:]*)$").expect("Invalid interface name regex")
});

/// Interface types with the shortest abbreviation IOS accepts for each.
static INTERFACE_TYPES: &[(&str, usize)] = &[
    ("GigabitEthernet", 2),
    ("FastEthernet", 2),
    ("TenGigabitEthernet", 2),
    ("TwentyFiveGigE", 2),
    ("FortyGigabitEthernet", 2),
    ("HundredGigE", 2),
    ("Ethernet", 2),
    ("Port-channel", 2),
    ("Vlan", 2),
    ("Loopback", 2),
    ("Tunnel", 2),
    ("Serial", 2),
    ("BDI", 2),
    ("Dialer", 2),
];

/// Canonical long form of an interface name (`gi0/1` becomes
/// `GigabitEthernet0/1`). Names of unknown types are returned trimmed but
/// otherwise unchanged.
pub fn canonical_interface_name(name: &str) -> String {
    let name = name.trim();
    let Some(caps) = INTERFACE_NAME_REGEX.captures(name) else {
        return name.to_string();
    };
    let kind = &caps[1];
    let id = &caps[2];
    INTERFACE_TYPES
        .iter()
        .find(|(full, min_len)| {
            kind.len() >= *min_len
                && kind.len() <= full.len()
                && full.as_bytes()[..kind.len()].eq_ignore_ascii_case(kind.as_bytes())
        })
        .map_or_else(|| format!("{}{}", kind, id), |(full, _)| format!("{}{}", full, id))
}

/// Configured interface speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    /// Autonegotiated
    Auto,
    /// Fixed speed in Mbit/s
    Mbps(u32),
}

impl std::str::FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Speed::Auto);
        }
        s.parse::<u32>()
            .map(Speed::Mbps)
            .map_err(|_| format!("invalid speed '{}'", s))
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speed::Auto => write!(f, "auto"),
            Speed::Mbps(mbps) => write!(f, "{}", mbps),
        }
    }
}

/// Configured duplex mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duplex {
    Auto,
    Full,
    Half,
}

impl std::str::FromStr for Duplex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Duplex::Auto),
            "full" => Ok(Duplex::Full),
            "half" => Ok(Duplex::Half),
            _ => Err(format!("invalid duplex '{}'. Valid options: auto, full, half", s)),
        }
    }
}

impl std::fmt::Display for Duplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Duplex::Auto => write!(f, "auto"),
            Duplex::Full => write!(f, "full"),
            Duplex::Half => write!(f, "half"),
        }
    }
}

/// Administrative switchport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchportMode {
    Access,
    Trunk,
    DynamicAuto,
    DynamicDesirable,
}

impl std::fmt::Display for SwitchportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchportMode::Access => write!(f, "access"),
            SwitchportMode::Trunk => write!(f, "trunk"),
            SwitchportMode::DynamicAuto => write!(f, "dynamic auto"),
            SwitchportMode::DynamicDesirable => write!(f, "dynamic desirable"),
        }
    }
}

/// Access-mode settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchportAccess {
    /// Access VLAN
    pub vlan: Option<u16>,
}

/// Trunk-mode settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchportTrunk {
    /// Trunk encapsulation (`dot1q`, `isl`, `negotiate`)
    pub encapsulation: Option<String>,
    /// Native VLAN
    pub native_vlan: Option<u16>,
    /// Explicitly allowed VLANs. `None` means the IOS default, all VLANs.
    pub allowed_vlans: Option<VlanSet>,
}

impl SwitchportTrunk {
    /// VLANs actually allowed on the trunk, resolving the IOS default.
    pub fn effective_allowed_vlans(&self) -> VlanSet {
        self.allowed_vlans.clone().unwrap_or_else(VlanSet::full)
    }

    /// Store an allowed set, folding "every VLAN" back into the default.
    pub fn set_allowed_vlans(&mut self, vlans: VlanSet) {
        self.allowed_vlans = if vlans.is_full() { None } else { Some(vlans) };
    }
}

/// Layer-2 switchport configuration. Zero-valued when not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switchport {
    /// Whether the interface runs as a switchport
    pub enabled: bool,
    /// Administrative mode
    pub mode: Option<SwitchportMode>,
    /// Access-mode settings
    pub access: SwitchportAccess,
    /// Trunk-mode settings
    pub trunk: SwitchportTrunk,
}

impl Switchport {
    /// Whether any switchport setting differs from the default.
    pub fn is_configured(&self) -> bool {
        *self != Switchport::default()
    }
}

/// One HSRP group on an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standby {
    /// HSRP group number
    pub group: u16,
    /// Virtual IP address
    pub ip_address: Option<Ipv4Addr>,
    /// Election priority
    pub priority: u8,
    /// Whether the router preempts a lower-priority active router
    pub preempt: bool,
}

impl Standby {
    /// A group with the IOS default priority.
    pub fn new(group: u16) -> Self {
        Self {
            group,
            ip_address: None,
            priority: DEFAULT_STANDBY_PRIORITY,
            preempt: false,
        }
    }
}

impl Default for Standby {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Direction an ACL is applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            _ => Err(format!("invalid direction '{}'. Valid options: in, out", s)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

/// An ACL applied to an interface. The name is not checked against the
/// device's access lists at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGroup {
    /// Referenced access-list name
    pub name: String,
    /// Traffic direction
    pub direction: Direction,
}

/// Layer-3 configuration. Zero-valued when the interface is not routed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceLayer3 {
    /// Primary address in CIDR form
    pub ip_address: Option<Ipv4Net>,
    /// Secondary addresses, in configuration order
    pub secondary_addresses: Vec<Ipv4Net>,
    /// Address is obtained via DHCP
    pub dhcp: bool,
    /// DHCP relay targets, in configuration order (repeats kept)
    pub helper_addresses: Vec<Ipv4Addr>,
    /// HSRP groups, unique by group number
    pub standby_groups: Vec<Standby>,
    /// Applied ACL
    pub access_group: Option<AccessGroup>,
}

impl InterfaceLayer3 {
    /// Look up an HSRP group by number.
    pub fn standby(&self, group: u16) -> Option<&Standby> {
        self.standby_groups.iter().find(|s| s.group == group)
    }

    /// Look up an HSRP group by number, creating it with defaults if absent.
    pub fn standby_mut(&mut self, group: u16) -> &mut Standby {
        let index = match self.standby_groups.iter().position(|s| s.group == group) {
            Some(index) => index,
            None => {
                self.standby_groups.push(Standby::new(group));
                self.standby_groups.len() - 1
            }
        };
        &mut self.standby_groups[index]
    }

    /// Remove an HSRP group, returning it if it existed.
    pub fn remove_standby(&mut self, group: u16) -> Option<Standby> {
        let index = self.standby_groups.iter().position(|s| s.group == group)?;
        Some(self.standby_groups.remove(index))
    }

    /// Whether any layer-3 setting differs from the default.
    pub fn is_configured(&self) -> bool {
        *self != InterfaceLayer3::default()
    }
}

/// Port-channel negotiation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    /// Static bundling
    On,
    /// LACP active
    Active,
    /// LACP passive
    Passive,
    /// PAgP auto
    Auto,
    /// PAgP desirable
    Desirable,
}

impl std::str::FromStr for ChannelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" => Ok(ChannelMode::On),
            "active" => Ok(ChannelMode::Active),
            "passive" => Ok(ChannelMode::Passive),
            "auto" => Ok(ChannelMode::Auto),
            "desirable" => Ok(ChannelMode::Desirable),
            _ => Err(format!(
                "invalid channel-group mode '{}'. Valid options: on, active, passive, auto, desirable",
                s
            )),
        }
    }
}

impl std::fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelMode::On => write!(f, "on"),
            ChannelMode::Active => write!(f, "active"),
            ChannelMode::Passive => write!(f, "passive"),
            ChannelMode::Auto => write!(f, "auto"),
            ChannelMode::Desirable => write!(f, "desirable"),
        }
    }
}

/// Port-channel membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelGroup {
    /// Port-channel number
    pub group_number: u16,
    /// Negotiation mode
    pub mode: ChannelMode,
}

/// A configured interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface name, unique within a device
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Administratively down
    pub shutdown: bool,
    /// Configured speed
    pub speed: Option<Speed>,
    /// Configured duplex
    pub duplex: Option<Duplex>,
    /// Layer-2 settings
    pub switchport: Switchport,
    /// Layer-3 settings
    pub layer3: InterfaceLayer3,
    /// Port-channel membership
    pub channel_group: Option<ChannelGroup>,
}

impl Interface {
    /// A new interface with every setting at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            shutdown: false,
            speed: None,
            duplex: None,
            switchport: Switchport::default(),
            layer3: InterfaceLayer3::default(),
            channel_group: None,
        }
    }

    /// Whether the interface is a trunk port.
    pub fn is_trunk(&self) -> bool {
        match self.switchport.mode {
            Some(mode) => mode == SwitchportMode::Trunk,
            None => self.switchport.enabled && self.switchport.trunk != SwitchportTrunk::default(),
        }
    }

    /// Whether VLAN `vlan` is carried by this interface as a switchport.
    pub fn carries_vlan(&self, vlan: u16) -> bool {
        if !self.switchport.enabled || !(VLAN_MIN..=VLAN_MAX).contains(&vlan) {
            return false;
        }
        if self.is_trunk() {
            self.switchport.trunk.effective_allowed_vlans().contains(vlan)
        } else {
            self.switchport.access.vlan.unwrap_or(1) == vlan
        }
    }
}
