//! # iosparse - Cisco IOS running-config parser
//!
//! iosparse turns the text printed by `show running-config` into a
//! strongly-typed device model for auditing and drift detection: interfaces
//! with their switchport, layer-3, HSRP and port-channel state, plus standard
//! and extended IPv4 access lists.
//!
//! ## Core Concepts
//!
//! - **Device**: the single value a parse produces
//! - **Interface**: one `interface` block, merged across re-openings
//! - **AccessList**: a named or numbered ACL with rules in file order
//! - **ParseWarning**: a non-fatal diagnostic tied to one input line
//!
//! IOS output is not reliably indented and blocks close implicitly, so the
//! parser is a keyword-driven state machine rather than an indentation
//! parser:
//!
//! ```text
//!  text ──► Tokenizer ──► Scanner ──┬──► interface parser ──┐
//!                                   └──► access-list parser ─┴──► Assembler ──► Device
//! ```
//!
//! Unrecognised lines never abort a parse. The only fatal error is input that
//! is not configuration text at all.
//!
//! ## Quick Example
//!
//! ```rust
//! let config = "\
//! interface GigabitEthernet0/1
//!  description Uplink
//!  switchport trunk encapsulation dot1q
//!  switchport trunk allowed vlan 10,20-22
//! !
//! ip access-list extended BLOCK_TELNET
//!  10 deny tcp any any eq 23
//!  20 permit ip any any
//! ";
//!
//! let output = iosparse::parse(config).unwrap();
//! let uplink = output.device.interface("Gi0/1").unwrap();
//! assert_eq!(uplink.description.as_deref(), Some("Uplink"));
//!
//! let acl = output.device.access_list("BLOCK_TELNET").unwrap();
//! assert_eq!(acl.rules.len(), 2);
//! assert!(!output.has_warnings());
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types.
    //!
    //! ```rust
    //! use iosparse::prelude::*;
    //!
    //! let output = Parser::new().parse("hostname core1\n").unwrap();
    //! assert_eq!(output.device.hostname.as_deref(), Some("core1"));
    //! ```

    pub use crate::config::ParserConfig;
    pub use crate::diff::{diff_devices, ChangeType, DeviceChange};
    pub use crate::error::{InputError, Result};
    pub use crate::model::{
        AccessList, AclAction, AclRule, AclType, AddressSpec, Device, Interface, Standby, VlanSet,
    };
    pub use crate::parser::{ParseOutput, Parser};
    pub use crate::warning::{ParseWarning, WarningKind};
}

/// Error types and result aliases.
pub mod error;

/// Non-fatal, per-line parse diagnostics.
pub mod warning;

/// Parser configuration loaded from files and the environment.
pub mod config;

/// The device model the parser populates.
pub mod model;

/// Tokenizer, block scanner and block parsers.
pub mod parser;

/// Comparison of two parsed devices.
pub mod diff;

pub use error::{InputError, Result};
pub use parser::{ParseOutput, Parser};

/// Parse configuration text with the default [`ParserConfig`](config::ParserConfig).
pub fn parse(text: &str) -> Result<ParseOutput> {
    Parser::new().parse(text)
}

/// Parse UTF-8 bytes with the default [`ParserConfig`](config::ParserConfig).
pub fn parse_bytes(bytes: &[u8]) -> Result<ParseOutput> {
    Parser::new().parse_bytes(bytes)
}

/// Returns the current version of iosparse.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
