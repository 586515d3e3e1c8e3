//! Block scanner.
//!
//! A single-pass state machine over tokenized lines. Opening lines move it
//! into an interface or access-list block; block lines are routed to the
//! matching block parser until a global command or another block opener
//! arrives. Unknown top-level lines are ignored.

use super::acl::{self, RuleOutcome};
use super::assembler::Assembler;
use super::interface::{self, ACCESS_GROUP_DIRECTIVE};
use super::keyword::{block_opener, is_global_line, kw, remainder, BlockKind, DirectiveError};
use super::tokenizer::Line;
use crate::config::ParserConfig;
use crate::model::{AclType, Device};
use crate::warning::{ParseWarning, WarningKind};
use tracing::{debug, trace};

/// Where the scanner is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Top level
    Global,
    /// Inside `interface`; holds the interface index
    InInterface(usize),
    /// Inside `ip access-list`; holds the list index
    InAcl(usize),
    /// Inside a block this crate does not model (`router`, `line` ...)
    Unmodeled,
}

pub(crate) struct Scanner<'c> {
    config: &'c ParserConfig,
    state: ScanState,
    assembler: Assembler,
    warnings: Vec<ParseWarning>,
}

impl<'c> Scanner<'c> {
    pub(crate) fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            state: ScanState::Global,
            assembler: Assembler::new(),
            warnings: Vec::new(),
        }
    }

    /// Process one line.
    pub(crate) fn feed(&mut self, line: &Line<'_>) {
        let tokens = line.tokens();
        if tokens.is_empty() {
            return;
        }

        if line.depth > 0 || self.continues_block(line) {
            self.feed_block(line, &tokens);
        } else {
            self.feed_global(line, &tokens);
        }
    }

    /// Finish the scan: the device and its warnings, ordered by line.
    pub(crate) fn finish(self) -> (Device, Vec<ParseWarning>) {
        let mut warnings = self.warnings;
        let device = self
            .assembler
            .finish(self.config.report_dangling_access_groups, &mut warnings);
        warnings.sort_by_key(|warning| warning.line);
        (device, warnings)
    }

    /// An unindented line still belongs to an open interface or access-list
    /// block unless it is a global command or opens a block itself.
    fn continues_block(&self, line: &Line<'_>) -> bool {
        if line.block.is_none() || line.block == Some(line.number) {
            return false;
        }
        matches!(self.state, ScanState::InInterface(_) | ScanState::InAcl(_))
            && !is_global_line(line.content)
    }

    fn feed_global(&mut self, line: &Line<'_>, tokens: &[&str]) {
        match block_opener(line.content) {
            Some(BlockKind::Interface) => self.open_interface(line, tokens),
            Some(BlockKind::AccessList) => self.open_access_list(line, tokens),
            Some(BlockKind::Other) => {
                trace!(line = line.number, "entering unmodeled block: {}", line.content);
                self.state = ScanState::Unmodeled;
            }
            None => {
                self.state = ScanState::Global;
                self.global_directive(line, tokens);
            }
        }
    }

    fn global_directive(&mut self, line: &Line<'_>, tokens: &[&str]) {
        match tokens {
            [hostname, name] if kw::HOSTNAME.matches(hostname) => {
                self.assembler.set_hostname(name);
            }
            [hostname] if kw::HOSTNAME.matches(hostname) => {
                self.warn(line, WarningKind::MalformedDirective {
                    reason: "missing hostname".to_string(),
                });
            }
            [access_list, number, rest @ ..] if kw::ACCESS_LIST.matches(access_list) => {
                self.legacy_rule(line, number, rest);
            }
            _ => trace!(line = line.number, "ignoring top-level line: {}", line.content),
        }
    }

    /// `interface <name>`. Some platforms print `interface Ethernet 0/1`.
    fn open_interface(&mut self, line: &Line<'_>, tokens: &[&str]) {
        let name = match tokens {
            [_, kind, number, ..] if number.starts_with(|c: char| c.is_ascii_digit()) => {
                format!("{}{}", kind, number)
            }
            [_, name, ..] => (*name).to_string(),
            _ => return,
        };
        let index = self
            .assembler
            .open_interface(&name, self.config.expand_interface_names);
        trace!(line = line.number, interface = %name, "entering interface block");
        self.state = ScanState::InInterface(index);
    }

    /// `ip access-list standard|extended <name>`.
    fn open_access_list(&mut self, line: &Line<'_>, tokens: &[&str]) {
        let acl_type = match tokens.get(2) {
            Some(token) if kw::STANDARD.matches(token) => AclType::Standard,
            Some(token) if kw::EXTENDED.matches(token) => AclType::Extended,
            // resequence, logging, role-based ...
            _ => {
                trace!(line = line.number, "entering unmodeled block: {}", line.content);
                self.state = ScanState::Unmodeled;
                return;
            }
        };
        let Some(name) = tokens.get(3) else {
            self.warn(line, WarningKind::MalformedDirective {
                reason: "missing access-list name".to_string(),
            });
            self.state = ScanState::Unmodeled;
            return;
        };

        let (index, mismatch) = self.assembler.open_access_list(name, acl_type);
        if let Some(existing) = mismatch {
            self.warn(line, WarningKind::AclTypeMismatch {
                name: (*name).to_string(),
                existing: existing.to_string(),
            });
        }
        trace!(line = line.number, acl = %name, "entering access-list block");
        self.state = ScanState::InAcl(index);
    }

    /// `access-list <number> ...`: a self-contained rule that leaves the
    /// scanner at top level.
    fn legacy_rule(&mut self, line: &Line<'_>, number: &str, rest: &[&str]) {
        let (number, acl_type) = match acl::legacy_list(number) {
            Ok(parsed) => parsed,
            Err(err) => return self.report(line, err),
        };
        let Some(acl_type) = acl_type else {
            self.warn(line, WarningKind::UnsupportedAclNumber { number });
            return;
        };

        let name = number.to_string();
        let (index, mismatch) = self.assembler.open_access_list(&name, acl_type);
        if let Some(existing) = mismatch {
            self.warn(line, WarningKind::AclTypeMismatch {
                name,
                existing: existing.to_string(),
            });
        }
        let content = remainder(line.content, 2);
        self.apply_acl_rule(index, line, content, rest);
    }

    fn feed_block(&mut self, line: &Line<'_>, tokens: &[&str]) {
        match self.state {
            ScanState::InInterface(index) => {
                let Some(iface) = self.assembler.interface_mut(index) else {
                    return;
                };
                match interface::apply_line(iface, line.content, tokens) {
                    Ok(directive) => {
                        trace!(line = line.number, directive, "interface directive");
                        if directive == ACCESS_GROUP_DIRECTIVE {
                            self.assembler
                                .record_access_group(index, line.number, line.content);
                        }
                    }
                    Err(err) => self.report(line, err),
                }
            }
            ScanState::InAcl(index) => self.apply_acl_rule(index, line, line.content, tokens),
            ScanState::Global | ScanState::Unmodeled => {
                trace!(line = line.number, "ignoring block line: {}", line.content);
            }
        }
    }

    fn apply_acl_rule(&mut self, index: usize, line: &Line<'_>, content: &str, tokens: &[&str]) {
        let step = self.config.acl_sequence_step;
        let Some(acl) = self.assembler.access_list_mut(index) else {
            return;
        };
        match acl::apply_rule(acl, content, tokens, step) {
            Ok(RuleOutcome::Appended {
                number,
                previous: Some(previous),
            }) => {
                self.warn(line, WarningKind::NonMonotonicSequence {
                    previous,
                    current: number,
                });
            }
            Ok(outcome) => trace!(line = line.number, ?outcome, "access-list rule"),
            Err(err) => self.report(line, err),
        }
    }

    fn report(&mut self, line: &Line<'_>, err: DirectiveError) {
        let kind = match err {
            DirectiveError::Unmodeled => {
                debug!(line = line.number, "unmodeled directive: {}", line.content);
                if !self.config.warn_unmodeled {
                    return;
                }
                WarningKind::UnmodeledDirective
            }
            DirectiveError::Malformed(reason) => WarningKind::MalformedDirective { reason },
            DirectiveError::VlanList(_) => WarningKind::MalformedVlanList,
        };
        self.warn(line, kind);
    }

    fn warn(&mut self, line: &Line<'_>, kind: WarningKind) {
        self.warnings
            .push(ParseWarning::new(line.number, line.content, kind));
    }
}
