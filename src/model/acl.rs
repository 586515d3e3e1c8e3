//! Access-list model.
//!
//! Rule order is semantically significant (first match wins), so rules are
//! kept in file order and never re-sorted, even when their sequence numbers
//! are out of order.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// ACL flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclType {
    /// Matches on source address only
    Standard,
    /// Matches on protocol, source, destination and ports
    Extended,
}

impl AclType {
    /// Type implied by a numbered list, for the IPv4 numbering ranges.
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1..=99 | 1300..=1999 => Some(AclType::Standard),
            100..=199 | 2000..=2699 => Some(AclType::Extended),
            _ => None,
        }
    }
}

impl std::str::FromStr for AclType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(AclType::Standard),
            "extended" => Ok(AclType::Extended),
            _ => Err(format!("invalid access-list type '{}'. Valid options: standard, extended", s)),
        }
    }
}

impl std::fmt::Display for AclType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AclType::Standard => write!(f, "standard"),
            AclType::Extended => write!(f, "extended"),
        }
    }
}

/// Rule action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclAction {
    Permit,
    Deny,
}

impl std::fmt::Display for AclAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AclAction::Permit => write!(f, "permit"),
            AclAction::Deny => write!(f, "deny"),
        }
    }
}

/// An address match. Wildcard masks are kept as written; they are not
/// converted to prefix lengths because they need not be contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressSpec {
    /// `any`
    Any,
    /// `host <ip>`
    Host(Ipv4Addr),
    /// `<network> <wildcard>`
    Network {
        address: Ipv4Addr,
        wildcard: Ipv4Addr,
    },
}

impl AddressSpec {
    /// Whether `addr` falls inside this spec.
    pub fn matches(&self, addr: Ipv4Addr) -> bool {
        match self {
            AddressSpec::Any => true,
            AddressSpec::Host(host) => *host == addr,
            AddressSpec::Network { address, wildcard } => {
                let care = !u32::from(*wildcard);
                u32::from(*address) & care == u32::from(addr) & care
            }
        }
    }
}

impl std::fmt::Display for AddressSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressSpec::Any => write!(f, "any"),
            AddressSpec::Host(host) => write!(f, "host {}", host),
            AddressSpec::Network { address, wildcard } => write!(f, "{} {}", address, wildcard),
        }
    }
}

/// A port match, stored as the literal operator and operands (`eq 23`,
/// `range 1000 2000`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortSpec(pub String);

impl PortSpec {
    /// The operator keyword (`eq`, `neq`, `gt`, `lt`, `range`).
    pub fn operator(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or("")
    }

    /// Operand tokens as written.
    pub fn operands(&self) -> Vec<&str> {
        self.0.split_whitespace().skip(1).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The matching part of a permit/deny rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclMatch {
    /// Permit or deny
    pub action: AclAction,
    /// Protocol (`ip`, `tcp`, ...). Absent on standard lists.
    pub protocol: Option<String>,
    /// Source address
    pub source: AddressSpec,
    /// Source port
    pub source_port: Option<PortSpec>,
    /// Destination address. Absent on standard lists.
    pub destination: Option<AddressSpec>,
    /// Destination port
    pub destination_port: Option<PortSpec>,
    /// Trailing keywords kept verbatim (`log`, `established`, ICMP types)
    pub options: Vec<String>,
}

/// What an ACL entry does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclEntry {
    /// A pure comment line
    Remark(String),
    /// A permit/deny rule
    Match(AclMatch),
}

/// One numbered ACL entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclRule {
    /// Sequence number
    pub number: u32,
    /// Entry body
    pub entry: AclEntry,
}

impl AclRule {
    /// Remark text, for remark entries.
    pub fn remark(&self) -> Option<&str> {
        match &self.entry {
            AclEntry::Remark(text) => Some(text),
            AclEntry::Match(_) => None,
        }
    }

    /// Match body, for permit/deny entries.
    pub fn matcher(&self) -> Option<&AclMatch> {
        match &self.entry {
            AclEntry::Match(m) => Some(m),
            AclEntry::Remark(_) => None,
        }
    }

    pub fn action(&self) -> Option<AclAction> {
        self.matcher().map(|m| m.action)
    }

    pub fn protocol(&self) -> Option<&str> {
        self.matcher().and_then(|m| m.protocol.as_deref())
    }
}

/// A standard or extended IPv4 access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessList {
    /// List name; numbered lists use their number
    pub name: String,
    /// List type
    #[serde(rename = "type")]
    pub acl_type: AclType,
    /// Entries in file order
    pub rules: Vec<AclRule>,
}

impl AccessList {
    pub fn new(name: impl Into<String>, acl_type: AclType) -> Self {
        Self {
            name: name.into(),
            acl_type,
            rules: Vec::new(),
        }
    }

    /// Sequence number of the last entry.
    pub fn last_number(&self) -> Option<u32> {
        self.rules.last().map(|rule| rule.number)
    }

    /// Whether the list was declared with a number rather than a name.
    pub fn is_numbered(&self) -> bool {
        self.name.parse::<u32>().is_ok()
    }

    /// Permit/deny entries, skipping remarks.
    pub fn match_rules(&self) -> impl Iterator<Item = (u32, &AclMatch)> + '_ {
        self.rules
            .iter()
            .filter_map(|rule| rule.matcher().map(|m| (rule.number, m)))
    }
}
