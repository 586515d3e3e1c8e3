//! Non-fatal parse diagnostics.
//!
//! Running configurations routinely carry lines this crate does not model.
//! Those lines never abort a parse; each one becomes a [`ParseWarning`] that
//! carries the line number and the raw text so audit tooling can report it.

use serde::{Deserialize, Serialize};

/// What went wrong on a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "code")]
pub enum WarningKind {
    /// A line inside a modeled block that no directive recognises.
    UnmodeledDirective,
    /// The directive was recognised but its arguments are invalid.
    MalformedDirective {
        /// Why the arguments were rejected
        reason: String,
    },
    /// A `switchport trunk allowed vlan` list could not be parsed.
    MalformedVlanList,
    /// An explicit ACL sequence number is lower than the previous one.
    NonMonotonicSequence {
        /// Number of the preceding rule
        previous: u32,
        /// Number found on this line
        current: u32,
    },
    /// A legacy numbered `access-list` outside the IPv4 standard/extended ranges.
    UnsupportedAclNumber {
        /// The list number as written
        number: u32,
    },
    /// A named ACL was reopened with a different type.
    AclTypeMismatch {
        /// ACL name
        name: String,
        /// Type the list was first declared with
        existing: String,
    },
    /// An interface references an ACL that is not defined in the device.
    DanglingAccessGroup {
        /// Interface holding the reference
        interface: String,
        /// Referenced ACL name
        acl: String,
    },
}

impl WarningKind {
    /// Stable short code for this kind of warning.
    pub fn code(&self) -> &'static str {
        match self {
            WarningKind::UnmodeledDirective => "unmodeled_directive",
            WarningKind::MalformedDirective { .. } => "malformed_directive",
            WarningKind::MalformedVlanList => "malformed_vlan_list",
            WarningKind::NonMonotonicSequence { .. } => "non_monotonic_sequence",
            WarningKind::UnsupportedAclNumber { .. } => "unsupported_acl_number",
            WarningKind::AclTypeMismatch { .. } => "acl_type_mismatch",
            WarningKind::DanglingAccessGroup { .. } => "dangling_access_group",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::UnmodeledDirective => write!(f, "unmodeled directive"),
            WarningKind::MalformedDirective { reason } => write!(f, "malformed directive ({})", reason),
            WarningKind::MalformedVlanList => write!(f, "malformed VLAN list"),
            WarningKind::NonMonotonicSequence { previous, current } => write!(
                f,
                "sequence number {} follows {} (rules kept in file order)",
                current, previous
            ),
            WarningKind::UnsupportedAclNumber { number } => {
                write!(f, "access-list number {} is not an IPv4 standard or extended list", number)
            }
            WarningKind::AclTypeMismatch { name, existing } => {
                write!(f, "access-list '{}' is already declared {}", name, existing)
            }
            WarningKind::DanglingAccessGroup { interface, acl } => write!(
                f,
                "interface {} references undefined access-list '{}'",
                interface, acl
            ),
        }
    }
}

/// A single non-fatal diagnostic tied to one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// Line number (1-indexed).
    pub line: usize,
    /// The raw line text, trimmed.
    pub text: String,
    /// What went wrong.
    pub kind: WarningKind,
}

impl ParseWarning {
    /// Create a new warning.
    pub fn new(line: usize, text: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            line,
            text: text.into(),
            kind,
        }
    }

    /// Shorthand for a [`WarningKind::MalformedDirective`] warning.
    pub fn malformed(line: usize, text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            line,
            text,
            WarningKind::MalformedDirective {
                reason: reason.into(),
            },
        )
    }

    /// Stable short code of the warning kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.text)
    }
}
