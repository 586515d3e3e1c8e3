//! IOS running-config parser.
//!
//! This module provides:
//! - A line tokenizer that infers block depth from opener keywords
//! - A block scanner routing lines to the interface and access-list parsers
//! - The [`Parser`] entry point and batch parsing across threads
//!
//! Data flows strictly upward: tokenizer, scanner, block parsers, assembler.

mod acl;
mod assembler;
mod interface;
pub mod keyword;
mod scanner;
pub mod tokenizer;

pub use keyword::{BlockKind, Keyword};
pub use tokenizer::{Line, Tokenizer};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::model::Device;
use crate::warning::ParseWarning;
use rayon::prelude::*;
use scanner::Scanner;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

/// The result of parsing one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutput {
    /// The best-effort device model
    pub device: Device,
    /// Non-fatal diagnostics, ordered by line
    pub warnings: Vec<ParseWarning>,
}

impl ParseOutput {
    /// Split into the device and its warnings.
    pub fn into_parts(self) -> (Device, Vec<ParseWarning>) {
        (self.device, self.warnings)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Configuration parser.
///
/// A parser holds only its [`ParserConfig`]; every call owns its own scan
/// state, so one parser can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with an explicit configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `show running-config` text.
    ///
    /// Fails only when the text contains binary data. Every other problem is
    /// reported as a warning next to the device.
    pub fn parse(&self, text: &str) -> Result<ParseOutput> {
        let span = debug_span!("parse", bytes = text.len());
        let _enter = span.enter();

        let mut scanner = Scanner::new(&self.config);
        for line in Tokenizer::new(text)? {
            scanner.feed(&line);
        }
        let (device, warnings) = scanner.finish();

        debug!(
            interfaces = device.interfaces.len(),
            access_lists = device.access_lists.len(),
            warnings = warnings.len(),
            "parsed configuration"
        );
        Ok(ParseOutput { device, warnings })
    }

    /// Parse raw bytes, which must be UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseOutput> {
        let text = std::str::from_utf8(bytes)?;
        self.parse(text)
    }

    /// Parse independent configurations in parallel.
    ///
    /// Results are returned in input order.
    pub fn parse_batch<S>(&self, configs: &[S]) -> Vec<Result<ParseOutput>>
    where
        S: AsRef<str> + Sync,
    {
        configs
            .par_iter()
            .map(|config| self.parse(config.as_ref()))
            .collect()
    }
}
