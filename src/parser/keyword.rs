//! Keyword and directive tables.
//!
//! IOS accepts any unambiguous prefix of a keyword (`sw tr enc dot1q`), so
//! every keyword carries the shortest prefix this parser accepts for it.
//! Directives are static tables keyed on keyword paths; adding support for a
//! new line is one table entry plus one handler.

use thiserror::Error;

/// A CLI keyword with its minimum accepted abbreviation length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    /// Full keyword spelling
    pub word: &'static str,
    /// Shortest accepted prefix length
    pub min_len: usize,
}

impl Keyword {
    /// Create a keyword; `min_len` is clamped to the word length.
    pub const fn new(word: &'static str, min_len: usize) -> Self {
        let min_len = if min_len > word.len() { word.len() } else { min_len };
        Self { word, min_len }
    }

    /// Whether `token` is an accepted (possibly abbreviated) spelling.
    pub fn matches(&self, token: &str) -> bool {
        let len = token.len();
        len >= self.min_len
            && len <= self.word.len()
            && self.word.as_bytes()[..len].eq_ignore_ascii_case(token.as_bytes())
    }
}

/// Keywords recognised anywhere in the grammar.
pub mod kw {
    use super::Keyword;

    pub const ACCESS: Keyword = Keyword::new("access", 3);
    pub const ACCESS_GROUP: Keyword = Keyword::new("access-group", 8);
    pub const ACCESS_LIST: Keyword = Keyword::new("access-list", 8);
    pub const ADD: Keyword = Keyword::new("add", 3);
    pub const ADDRESS: Keyword = Keyword::new("address", 4);
    pub const ALL: Keyword = Keyword::new("all", 3);
    pub const ALLOWED: Keyword = Keyword::new("allowed", 2);
    pub const ANY: Keyword = Keyword::new("any", 3);
    pub const BANNER: Keyword = Keyword::new("banner", 6);
    pub const CHANNEL_GROUP: Keyword = Keyword::new("channel-group", 9);
    pub const CLASS_MAP: Keyword = Keyword::new("class-map", 9);
    pub const CONTROLLER: Keyword = Keyword::new("controller", 10);
    pub const CRYPTO: Keyword = Keyword::new("crypto", 6);
    pub const DEFINITION: Keyword = Keyword::new("definition", 3);
    pub const DENY: Keyword = Keyword::new("deny", 3);
    pub const DESCRIPTION: Keyword = Keyword::new("description", 4);
    pub const DHCP: Keyword = Keyword::new("dhcp", 4);
    pub const DUPLEX: Keyword = Keyword::new("duplex", 3);
    pub const DYNAMIC: Keyword = Keyword::new("dynamic", 3);
    pub const ENCAPSULATION: Keyword = Keyword::new("encapsulation", 3);
    pub const END: Keyword = Keyword::new("end", 3);
    pub const EXCEPT: Keyword = Keyword::new("except", 3);
    pub const EXIT: Keyword = Keyword::new("exit", 4);
    pub const EXTENDED: Keyword = Keyword::new("extended", 3);
    pub const HELPER_ADDRESS: Keyword = Keyword::new("helper-address", 6);
    pub const HOST: Keyword = Keyword::new("host", 4);
    pub const HOSTNAME: Keyword = Keyword::new("hostname", 8);
    pub const INTERFACE: Keyword = Keyword::new("interface", 3);
    pub const IP: Keyword = Keyword::new("ip", 2);
    pub const IPV6: Keyword = Keyword::new("ipv6", 4);
    pub const LINE: Keyword = Keyword::new("line", 4);
    pub const MAC: Keyword = Keyword::new("mac", 3);
    pub const MODE: Keyword = Keyword::new("mode", 2);
    pub const NATIVE: Keyword = Keyword::new("native", 3);
    pub const NO: Keyword = Keyword::new("no", 2);
    pub const NONE: Keyword = Keyword::new("none", 4);
    pub const PERMIT: Keyword = Keyword::new("permit", 3);
    pub const POLICY_MAP: Keyword = Keyword::new("policy-map", 10);
    pub const PREEMPT: Keyword = Keyword::new("preempt", 3);
    pub const PRIORITY: Keyword = Keyword::new("priority", 3);
    pub const REMARK: Keyword = Keyword::new("remark", 3);
    pub const REMOVE: Keyword = Keyword::new("remove", 3);
    pub const ROUTE_MAP: Keyword = Keyword::new("route-map", 9);
    pub const ROUTER: Keyword = Keyword::new("router", 6);
    pub const SECONDARY: Keyword = Keyword::new("secondary", 3);
    pub const SHUTDOWN: Keyword = Keyword::new("shutdown", 4);
    pub const SPEED: Keyword = Keyword::new("speed", 3);
    pub const STANDARD: Keyword = Keyword::new("standard", 3);
    pub const STANDBY: Keyword = Keyword::new("standby", 4);
    pub const SWITCHPORT: Keyword = Keyword::new("switchport", 2);
    pub const TRUNK: Keyword = Keyword::new("trunk", 2);
    pub const VLAN: Keyword = Keyword::new("vlan", 2);
    pub const VRF: Keyword = Keyword::new("vrf", 3);

    // Global configuration commands
    pub const AAA: Keyword = Keyword::new("aaa", 3);
    pub const BOOT: Keyword = Keyword::new("boot", 4);
    pub const BOOT_END_MARKER: Keyword = Keyword::new("boot-end-marker", 15);
    pub const BOOT_START_MARKER: Keyword = Keyword::new("boot-start-marker", 17);
    pub const BUFFERED: Keyword = Keyword::new("buffered", 3);
    pub const CDP: Keyword = Keyword::new("cdp", 3);
    pub const CEF: Keyword = Keyword::new("cef", 3);
    pub const CLASSLESS: Keyword = Keyword::new("classless", 9);
    pub const CLOCK: Keyword = Keyword::new("clock", 5);
    pub const CONSOLE: Keyword = Keyword::new("console", 4);
    pub const DEFAULT_GATEWAY: Keyword = Keyword::new("default-gateway", 15);
    pub const DOMAIN: Keyword = Keyword::new("domain", 6);
    pub const DOMAIN_LOOKUP: Keyword = Keyword::new("domain-lookup", 13);
    pub const DOMAIN_NAME: Keyword = Keyword::new("domain-name", 11);
    pub const ENABLE: Keyword = Keyword::new("enable", 6);
    pub const ERRDISABLE: Keyword = Keyword::new("errdisable", 10);
    pub const EXTEND: Keyword = Keyword::new("extend", 6);
    pub const FORWARD_PROTOCOL: Keyword = Keyword::new("forward-protocol", 16);
    pub const HTTP: Keyword = Keyword::new("http", 4);
    pub const LICENSE: Keyword = Keyword::new("license", 7);
    pub const LLDP: Keyword = Keyword::new("lldp", 4);
    pub const LOGGING: Keyword = Keyword::new("logging", 7);
    pub const MULTICAST_ROUTING: Keyword = Keyword::new("multicast-routing", 17);
    pub const NAME_SERVER: Keyword = Keyword::new("name-server", 11);
    pub const NTP: Keyword = Keyword::new("ntp", 3);
    pub const RADIUS_SERVER: Keyword = Keyword::new("radius-server", 13);
    pub const ROUTE: Keyword = Keyword::new("route", 5);
    pub const ROUTING: Keyword = Keyword::new("routing", 7);
    pub const RUN: Keyword = Keyword::new("run", 3);
    pub const SERVICE: Keyword = Keyword::new("service", 7);
    pub const SNMP_SERVER: Keyword = Keyword::new("snmp-server", 11);
    pub const SPANNING_TREE: Keyword = Keyword::new("spanning-tree", 13);
    pub const SSH: Keyword = Keyword::new("ssh", 3);
    pub const TACACS_SERVER: Keyword = Keyword::new("tacacs-server", 13);
    pub const TRAP: Keyword = Keyword::new("trap", 4);
    pub const UNICAST_ROUTING: Keyword = Keyword::new("unicast-routing", 15);
    pub const USERNAME: Keyword = Keyword::new("username", 8);
    pub const VERSION: Keyword = Keyword::new("version", 7);
    pub const VTP: Keyword = Keyword::new("vtp", 3);
}

/// Kind of top-level block a line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `interface <name>`
    Interface,
    /// `ip access-list <type> <name>`
    AccessList,
    /// Any other sub-mode block this crate does not model
    Other,
}

/// Top-level lines that open a sub-mode block.
static BLOCK_OPENERS: &[(BlockKind, &[Keyword])] = &[
    (BlockKind::Interface, &[kw::INTERFACE]),
    (BlockKind::AccessList, &[kw::IP, kw::ACCESS_LIST]),
    (BlockKind::Other, &[kw::IPV6, kw::ACCESS_LIST]),
    (BlockKind::Other, &[kw::MAC, kw::ACCESS_LIST]),
    (BlockKind::Other, &[kw::IP, kw::VRF]),
    (BlockKind::Other, &[kw::VRF, kw::DEFINITION]),
    (BlockKind::Other, &[kw::IP, kw::DHCP]),
    (BlockKind::Other, &[kw::ROUTER]),
    (BlockKind::Other, &[kw::LINE]),
    (BlockKind::Other, &[kw::VLAN]),
    (BlockKind::Other, &[kw::CLASS_MAP]),
    (BlockKind::Other, &[kw::POLICY_MAP]),
    (BlockKind::Other, &[kw::ROUTE_MAP]),
    (BlockKind::Other, &[kw::CRYPTO]),
    (BlockKind::Other, &[kw::CONTROLLER]),
];

/// Classify a top-level line as a block opener.
///
/// Openers need at least one argument after their keyword path, so a bare
/// `interface` or `ip access-list` is not a block.
pub fn block_opener(content: &str) -> Option<BlockKind> {
    BLOCK_OPENERS.iter().find_map(|(kind, path)| {
        let mut tokens = content.split_whitespace();
        let matched = path
            .iter()
            .all(|keyword| tokens.next().is_some_and(|token| keyword.matches(token)));
        (matched && tokens.next().is_some()).then_some(*kind)
    })
}

/// Global configuration commands that never appear inside a block.
///
/// Forms that also exist as interface commands (`cdp enable`,
/// `logging event`, `spanning-tree portfast`) are listed by their global
/// sub-keyword only.
static GLOBAL_COMMANDS: &[&[Keyword]] = &[
    &[kw::HOSTNAME],
    &[kw::ACCESS_LIST],
    &[kw::VERSION],
    &[kw::SERVICE],
    &[kw::BOOT],
    &[kw::BOOT_START_MARKER],
    &[kw::BOOT_END_MARKER],
    &[kw::ENABLE],
    &[kw::USERNAME],
    &[kw::AAA],
    &[kw::CLOCK],
    &[kw::NTP],
    &[kw::SNMP_SERVER],
    &[kw::TACACS_SERVER],
    &[kw::RADIUS_SERVER],
    &[kw::VTP],
    &[kw::ERRDISABLE],
    &[kw::LICENSE],
    &[kw::CDP, kw::RUN],
    &[kw::LLDP, kw::RUN],
    &[kw::LOGGING, kw::BUFFERED],
    &[kw::LOGGING, kw::CONSOLE],
    &[kw::LOGGING, kw::HOST],
    &[kw::LOGGING, kw::TRAP],
    &[kw::SPANNING_TREE, kw::MODE],
    &[kw::SPANNING_TREE, kw::EXTEND],
    &[kw::SPANNING_TREE, kw::VLAN],
    &[kw::IP, kw::ROUTING],
    &[kw::IP, kw::ROUTE],
    &[kw::IP, kw::DEFAULT_GATEWAY],
    &[kw::IP, kw::DOMAIN],
    &[kw::IP, kw::DOMAIN_NAME],
    &[kw::IP, kw::DOMAIN_LOOKUP],
    &[kw::IP, kw::NAME_SERVER],
    &[kw::IP, kw::HTTP],
    &[kw::IP, kw::SSH],
    &[kw::IP, kw::CEF],
    &[kw::IP, kw::CLASSLESS],
    &[kw::IP, kw::FORWARD_PROTOCOL],
    &[kw::IP, kw::MULTICAST_ROUTING],
    &[kw::IPV6, kw::UNICAST_ROUTING],
    &[kw::IPV6, kw::ROUTE],
];

/// Whether an unindented line belongs to global configuration: it opens a
/// block or is a global command, possibly negated.
pub fn is_global_line(content: &str) -> bool {
    if block_opener(content).is_some() {
        return true;
    }
    let tokens: Vec<&str> = content.split_whitespace().collect();
    let (_, body) = strip_negation(&tokens);
    GLOBAL_COMMANDS.iter().any(|path| {
        path.len() <= body.len()
            && path
                .iter()
                .zip(body)
                .all(|(keyword, token)| keyword.matches(token))
    })
}

/// Split off the first whitespace-delimited token.
pub fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

/// Raw text after skipping `count` tokens, trimmed.
///
/// Free-text fields (descriptions, remarks) keep their inner spacing this way.
pub fn remainder(s: &str, count: usize) -> &str {
    let mut rest = s;
    for _ in 0..count {
        match next_token(rest) {
            Some((_, tail)) => rest = tail,
            None => return "",
        }
    }
    rest.trim()
}

/// Why a directive handler rejected a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// The line is legal IOS but not part of the model.
    #[error("unmodeled directive")]
    Unmodeled,
    /// The arguments do not fit the directive grammar.
    #[error("{0}")]
    Malformed(String),
    /// A VLAN list could not be parsed.
    #[error("malformed VLAN list: {0}")]
    VlanList(String),
}

impl DirectiveError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        DirectiveError::Malformed(reason.into())
    }
}

/// Arguments handed to a directive handler.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveArgs<'l> {
    /// Tokens following the matched keyword path
    pub args: &'l [&'l str],
    /// Raw text following the matched keyword path, trimmed
    pub rest: &'l str,
    /// The line was prefixed with `no`
    pub negated: bool,
}

/// Handler applying one directive to its accumulator.
pub type DirectiveFn<T> = fn(&mut T, &DirectiveArgs<'_>) -> Result<(), DirectiveError>;

/// One entry of a directive table.
pub struct Directive<T> {
    /// Canonical directive name, used in logs
    pub name: &'static str,
    /// Keyword path the line must start with
    pub path: &'static [Keyword],
    /// Handler
    pub apply: DirectiveFn<T>,
}

impl<T> std::fmt::Debug for Directive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directive").field("name", &self.name).finish()
    }
}

/// Find the directive with the longest keyword path matching `tokens`.
pub fn lookup<'t, T>(table: &'t [Directive<T>], tokens: &[&str]) -> Option<&'t Directive<T>> {
    table
        .iter()
        .filter(|directive| {
            directive.path.len() <= tokens.len()
                && directive
                    .path
                    .iter()
                    .zip(tokens)
                    .all(|(keyword, token)| keyword.matches(token))
        })
        .max_by_key(|directive| directive.path.len())
}

/// Strip a leading `no`, reporting whether it was present.
pub fn strip_negation<'a, 'b>(tokens: &'b [&'a str]) -> (bool, &'b [&'a str]) {
    match tokens.split_first() {
        Some((first, rest)) if kw::NO.matches(first) => (true, rest),
        _ => (false, tokens),
    }
}

/// Run the matching directive from `table` against one line.
///
/// Returns the directive name on success.
pub fn dispatch<T>(
    table: &[Directive<T>],
    target: &mut T,
    content: &str,
    tokens: &[&str],
) -> Result<&'static str, DirectiveError> {
    let (negated, body) = strip_negation(tokens);
    let directive = lookup(table, body).ok_or(DirectiveError::Unmodeled)?;
    let consumed = directive.path.len() + usize::from(negated);
    let args = DirectiveArgs {
        args: &tokens[consumed..],
        rest: remainder(content, consumed),
        negated,
    };
    (directive.apply)(target, &args)?;
    Ok(directive.name)
}
