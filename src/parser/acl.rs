//! Access-list rule parser.
//!
//! Handles both rule styles:
//!
//! - named/sequenced lines inside an `ip access-list` block:
//!   `[<seq>] remark <text>` and `[<seq>] permit|deny ...`
//! - legacy one-line rules: `access-list <number> permit|deny|remark ...`
//!
//! Rules are appended in file order. Lines without a sequence number are
//! numbered `last + step`.

use super::keyword::{dispatch, kw, remainder, Directive, DirectiveArgs, DirectiveError};
use crate::model::{AccessList, AclAction, AclEntry, AclMatch, AclRule, AclType, AddressSpec, PortSpec};
use std::net::Ipv4Addr;

/// Port operators and the number of operands each takes.
const PORT_OPERATORS: &[(&str, usize)] = &[("eq", 1), ("neq", 1), ("gt", 1), ("lt", 1), ("range", 2)];

/// Operators that accept a list of ports (`eq 80 443 8080`).
const PORT_LIST_OPERATORS: &[&str] = &["eq", "neq"];

/// Well-known TCP and UDP port names IOS prints in place of numbers.
const PORT_NAMES: &[&str] = &[
    "bgp", "biff", "bootpc", "bootps", "chargen", "cmd", "daytime", "discard", "dnsix", "domain",
    "echo", "exec", "finger", "ftp", "ftp-data", "gopher", "hostname", "ident", "irc", "isakmp",
    "klogin", "kshell", "login", "lpd", "mobile-ip", "nameserver", "netbios-dgm", "netbios-ns",
    "netbios-ss", "nntp", "non500-isakmp", "ntp", "pim-auto-rp", "pop2", "pop3", "rip", "smtp",
    "snmp", "snmptrap", "sunrpc", "syslog", "tacacs", "talk", "telnet", "tftp", "time", "uucp",
    "who", "whois", "www", "xdmcp",
];

fn is_port(token: &str) -> bool {
    token.parse::<u16>().is_ok() || PORT_NAMES.iter().any(|name| name.eq_ignore_ascii_case(token))
}

/// Rule body under construction; the list type decides the grammar.
#[derive(Debug)]
struct RuleBody {
    acl_type: AclType,
    entry: Option<AclEntry>,
}

/// Rule verbs.
static RULE_DIRECTIVES: &[Directive<RuleBody>] = &[
    Directive {
        name: "remark",
        path: &[kw::REMARK],
        apply: apply_remark,
    },
    Directive {
        name: "permit",
        path: &[kw::PERMIT],
        apply: apply_permit,
    },
    Directive {
        name: "deny",
        path: &[kw::DENY],
        apply: apply_deny,
    },
];

/// Result of applying one rule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleOutcome {
    /// A rule was appended. `previous` is set when its number is lower than
    /// the rule before it.
    Appended { number: u32, previous: Option<u32> },
    /// `no <seq>` deleted a rule.
    Removed { number: u32 },
}

fn is_sequence(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parse the number of a legacy `access-list <number>` line.
///
/// Returns the type implied by the numbering range, or `None` for numbers
/// outside the IPv4 standard/extended ranges (MAC, IPX and similar lists).
pub(crate) fn legacy_list(token: &str) -> Result<(u32, Option<AclType>), DirectiveError> {
    let number: u32 = token
        .parse()
        .map_err(|_| DirectiveError::malformed(format!("invalid access-list number '{}'", token)))?;
    Ok((number, AclType::from_number(number)))
}

/// Apply one rule line to `acl`.
pub(crate) fn apply_rule(
    acl: &mut AccessList,
    content: &str,
    tokens: &[&str],
    step: u32,
) -> Result<RuleOutcome, DirectiveError> {
    if let [no, seq] = tokens {
        if kw::NO.matches(no) && is_sequence(seq) {
            return remove_rule(acl, seq);
        }
    }

    let (explicit, body) = match tokens.split_first() {
        Some((first, rest)) if is_sequence(first) => {
            let number: u32 = first.parse().map_err(|_| {
                DirectiveError::malformed(format!("sequence number '{}' out of range", first))
            })?;
            (Some(number), rest)
        }
        _ => (None, tokens),
    };
    let body_content = if explicit.is_some() {
        remainder(content, 1)
    } else {
        content
    };

    let mut rule = RuleBody {
        acl_type: acl.acl_type,
        entry: None,
    };
    dispatch(RULE_DIRECTIVES, &mut rule, body_content, body)?;
    let entry = rule.entry.ok_or(DirectiveError::Unmodeled)?;

    let last = acl.last_number();
    let number = explicit.unwrap_or_else(|| last.map_or(step, |last| last.saturating_add(step)));
    acl.rules.push(AclRule { number, entry });

    Ok(RuleOutcome::Appended {
        number,
        previous: last.filter(|last| number < *last),
    })
}

fn remove_rule(acl: &mut AccessList, seq: &str) -> Result<RuleOutcome, DirectiveError> {
    let number: u32 = seq
        .parse()
        .map_err(|_| DirectiveError::malformed(format!("sequence number '{}' out of range", seq)))?;
    let index = acl
        .rules
        .iter()
        .position(|rule| rule.number == number)
        .ok_or_else(|| DirectiveError::malformed(format!("no rule with sequence number {}", number)))?;
    acl.rules.remove(index);
    Ok(RuleOutcome::Removed { number })
}

fn apply_remark(rule: &mut RuleBody, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    if args.negated {
        return Err(DirectiveError::Unmodeled);
    }
    rule.entry = Some(AclEntry::Remark(args.rest.to_string()));
    Ok(())
}

fn apply_permit(rule: &mut RuleBody, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    apply_match(rule, AclAction::Permit, args)
}

fn apply_deny(rule: &mut RuleBody, args: &DirectiveArgs<'_>) -> Result<(), DirectiveError> {
    apply_match(rule, AclAction::Deny, args)
}

fn apply_match(
    rule: &mut RuleBody,
    action: AclAction,
    args: &DirectiveArgs<'_>,
) -> Result<(), DirectiveError> {
    if args.negated {
        return Err(DirectiveError::Unmodeled);
    }
    let matcher = match rule.acl_type {
        AclType::Standard => parse_standard(action, args.args)?,
        AclType::Extended => parse_extended(action, args.args)?,
    };
    rule.entry = Some(AclEntry::Match(matcher));
    Ok(())
}

/// `permit|deny <source> [<wildcard>] [log]`
fn parse_standard(action: AclAction, tokens: &[&str]) -> Result<AclMatch, DirectiveError> {
    let mut cursor = Cursor::new(tokens);
    let source = cursor.standard_address()?;
    Ok(AclMatch {
        action,
        protocol: None,
        source,
        source_port: None,
        destination: None,
        destination_port: None,
        options: cursor.rest(),
    })
}

/// `permit|deny <proto> <src> [<port>] <dst> [<port>] [<options>...]`
fn parse_extended(action: AclAction, tokens: &[&str]) -> Result<AclMatch, DirectiveError> {
    let mut cursor = Cursor::new(tokens);
    let protocol = cursor
        .advance()
        .ok_or_else(|| DirectiveError::malformed("missing protocol"))?
        .to_lowercase();
    let source = cursor.address()?;
    let source_port = cursor.port()?;
    let destination = cursor.address()?;
    let destination_port = cursor.port()?;
    Ok(AclMatch {
        action,
        protocol: Some(protocol),
        source,
        source_port,
        destination: Some(destination),
        destination_port,
        options: cursor.rest(),
    })
}

/// Token cursor over the arguments of a permit/deny rule.
struct Cursor<'t, 'a> {
    tokens: &'t [&'a str],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [&'a str]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn rest(&self) -> Vec<String> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .map(|token| (*token).to_string())
            .collect()
    }

    fn ipv4(&mut self, what: &str) -> Result<Ipv4Addr, DirectiveError> {
        let token = self
            .advance()
            .ok_or_else(|| DirectiveError::malformed(format!("missing {}", what)))?;
        token
            .parse()
            .map_err(|_| DirectiveError::malformed(format!("invalid {} '{}'", what, token)))
    }

    /// `any`, `host <ip>` or `<network> <wildcard>`.
    fn address(&mut self) -> Result<AddressSpec, DirectiveError> {
        let token = self
            .peek()
            .ok_or_else(|| DirectiveError::malformed("missing address"))?;
        if kw::ANY.matches(token) {
            self.pos += 1;
            return Ok(AddressSpec::Any);
        }
        if kw::HOST.matches(token) {
            self.pos += 1;
            return Ok(AddressSpec::Host(self.ipv4("host address")?));
        }
        if token.eq_ignore_ascii_case("object-group") || token.eq_ignore_ascii_case("addrgroup") {
            return Err(DirectiveError::Unmodeled);
        }
        let address = self.ipv4("address")?;
        let wildcard = self.ipv4("wildcard mask")?;
        Ok(AddressSpec::Network { address, wildcard })
    }

    /// Standard lists also accept a bare address, meaning a single host.
    fn standard_address(&mut self) -> Result<AddressSpec, DirectiveError> {
        let Some(token) = self.peek() else {
            return Err(DirectiveError::malformed("missing address"));
        };
        if kw::ANY.matches(token) || kw::HOST.matches(token) {
            return self.address();
        }
        let address = self.ipv4("address")?;
        match self.peek().and_then(|token| token.parse::<Ipv4Addr>().ok()) {
            Some(wildcard) => {
                self.pos += 1;
                Ok(AddressSpec::Network { address, wildcard })
            }
            None => Ok(AddressSpec::Host(address)),
        }
    }

    /// Optional port match following an address.
    fn port(&mut self) -> Result<Option<PortSpec>, DirectiveError> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };
        let operator = token.to_lowercase();
        let Some((name, operands)) = PORT_OPERATORS.iter().find(|(op, _)| *op == operator) else {
            return Ok(None);
        };
        self.pos += 1;

        let mut spec = operator;
        for _ in 0..*operands {
            let operand = self
                .advance()
                .ok_or_else(|| DirectiveError::malformed(format!("'{}' needs a port", token)))?;
            spec.push(' ');
            spec.push_str(operand);
        }
        if PORT_LIST_OPERATORS.contains(name) {
            while let Some(operand) = self.peek().filter(|token| is_port(token)) {
                self.pos += 1;
                spec.push(' ');
                spec.push_str(operand);
            }
        }
        Ok(Some(PortSpec(spec)))
    }
}
