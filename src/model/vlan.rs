//! VLAN id sets as used by `switchport trunk allowed vlan`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

/// Lowest configurable VLAN id.
pub const VLAN_MIN: u16 = 1;
/// Highest configurable VLAN id.
pub const VLAN_MAX: u16 = 4094;

/// Errors produced while parsing a VLAN list such as `10,12-14`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VlanListError {
    #[error("empty VLAN list")]
    Empty,

    #[error("invalid VLAN id '{0}'")]
    InvalidId(String),

    #[error("VLAN id {0} outside 1-4094")]
    OutOfRange(u32),

    #[error("descending VLAN range {0}-{1}")]
    DescendingRange(u16, u16),
}

/// Parse one VLAN id and check it against the configurable range.
pub fn parse_vlan_id(s: &str) -> Result<u16, VlanListError> {
    let id: u32 = s
        .trim()
        .parse()
        .map_err(|_| VlanListError::InvalidId(s.trim().to_string()))?;
    if !(u32::from(VLAN_MIN)..=u32::from(VLAN_MAX)).contains(&id) {
        return Err(VlanListError::OutOfRange(id));
    }
    // Range-checked above.
    Ok(id as u16)
}

/// An ordered, duplicate-free set of VLAN ids.
///
/// Iteration is ascending, so two sets built from differently written lists
/// (`20,10-11` and `10,11,20`) compare and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VlanSet(BTreeSet<u16>);

impl VlanSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every configurable VLAN, 1-4094.
    pub fn full() -> Self {
        Self((VLAN_MIN..=VLAN_MAX).collect())
    }

    pub fn contains(&self, vlan: u16) -> bool {
        self.0.contains(&vlan)
    }

    pub fn insert(&mut self, vlan: u16) -> bool {
        self.0.insert(vlan)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this set holds every configurable VLAN.
    pub fn is_full(&self) -> bool {
        self.0.len() == usize::from(VLAN_MAX - VLAN_MIN + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    /// Ids in ascending order.
    pub fn to_vec(&self) -> Vec<u16> {
        self.iter().collect()
    }

    pub fn union(&self, other: &VlanSet) -> VlanSet {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn difference(&self, other: &VlanSet) -> VlanSet {
        Self(self.0.difference(&other.0).copied().collect())
    }

    /// Every configurable VLAN not in this set.
    pub fn complement(&self) -> VlanSet {
        Self::full().difference(self)
    }

    /// Render in IOS list syntax, collapsing runs into ranges (`10,20-22`).
    pub fn to_ios_list(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut iter = self.iter().peekable();
        while let Some(start) = iter.next() {
            let mut end = start;
            while let Some(&next) = iter.peek() {
                if next == end + 1 {
                    end = next;
                    iter.next();
                } else {
                    break;
                }
            }
            if start == end {
                parts.push(start.to_string());
            } else {
                parts.push(format!("{}-{}", start, end));
            }
        }
        parts.join(",")
    }
}

impl FromStr for VlanSet {
    type Err = VlanListError;

    /// Parse IOS list syntax: comma-separated ids and `a-b` ranges.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = VlanSet::new();
        for item in s.split(',').map(str::trim) {
            if item.is_empty() {
                return Err(VlanListError::Empty);
            }
            match item.split_once('-') {
                Some((low, high)) => {
                    let low = parse_vlan_id(low)?;
                    let high = parse_vlan_id(high)?;
                    if low > high {
                        return Err(VlanListError::DescendingRange(low, high));
                    }
                    set.0.extend(low..=high);
                }
                None => {
                    set.insert(parse_vlan_id(item)?);
                }
            }
        }
        Ok(set)
    }
}

impl FromIterator<u16> for VlanSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for VlanSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_ios_list())
    }
}
