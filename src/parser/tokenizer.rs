//! Line tokenizer.
//!
//! Turns raw configuration text into logical lines with their nesting depth.
//! IOS does not reliably indent sub-block lines, so depth comes from block
//! keyword recognition: a recognised opener starts a block, indented lines
//! after it are depth 1, and a column-0 `!`, `exit` or `end` closes it.
//! Blank lines, `!` comments and banner bodies are dropped.

use super::keyword::{block_opener, kw, next_token};
use crate::error::{InputError, Result};

/// One logical configuration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line number in the input (1-indexed)
    pub number: usize,
    /// 0 for top-level lines, 1 inside a block
    pub depth: usize,
    /// The line started with whitespace
    pub indented: bool,
    /// Line number of the block opener governing this line, if a block is open
    pub block: Option<usize>,
    /// Line text without leading or trailing whitespace
    pub content: &'a str,
}

impl<'a> Line<'a> {
    /// Whitespace-separated tokens of the line.
    pub fn tokens(&self) -> Vec<&'a str> {
        self.content.split_whitespace().collect()
    }
}

/// Lazy, restartable iterator over the logical lines of a configuration.
///
/// Cloning a tokenizer restarts nothing; it forks the iteration at the
/// current position. Call [`Tokenizer::new`] again to start over.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    open_block: Option<usize>,
    banner_delimiter: Option<&'a str>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer, rejecting text that contains binary data.
    pub fn new(text: &'a str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        validate_text(text)?;
        Ok(Self {
            lines: text.lines().enumerate(),
            open_block: None,
            banner_delimiter: None,
        })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, raw) = self.lines.next()?;
            let number = index + 1;

            if let Some(delimiter) = self.banner_delimiter {
                if raw.contains(delimiter) {
                    self.banner_delimiter = None;
                }
                continue;
            }

            let trimmed_end = raw.trim_end();
            let content = trimmed_end.trim_start();
            let indented = content.len() != trimmed_end.len();

            if content.is_empty() {
                continue;
            }
            if content.starts_with('!') {
                if !indented {
                    self.open_block = None;
                }
                continue;
            }

            let first = next_token(content).map_or("", |(token, _)| token);
            if kw::EXIT.matches(first) && content.len() == first.len() {
                self.open_block = None;
                continue;
            }
            if !indented && kw::END.matches(first) && content.len() == first.len() {
                self.open_block = None;
                continue;
            }

            if !indented {
                if block_opener(content).is_some() {
                    self.open_block = Some(number);
                } else if let Some(delimiter) = banner_delimiter(content) {
                    self.banner_delimiter = Some(delimiter);
                    self.open_block = None;
                }
            }

            let depth = usize::from(indented && self.open_block.is_some());
            return Some(Line {
                number,
                depth,
                indented,
                block: self.open_block,
                content,
            });
        }
    }
}

/// ETX, the byte IOS writes for a `^C` banner delimiter in saved configs.
const ETX: u8 = 0x03;

/// Reject NUL and other control bytes that never occur in configuration text.
///
/// ETX is allowed on banner lines, where it is the usual delimiter.
fn validate_text(text: &str) -> Result<()> {
    let mut banner: Option<&str> = None;
    for (index, line) in text.lines().enumerate() {
        let in_banner = match banner {
            Some(delimiter) => {
                if line.contains(delimiter) {
                    banner = None;
                }
                true
            }
            None => {
                let content = line.trim();
                let opens = next_token(content).is_some_and(|(first, _)| kw::BANNER.matches(first));
                if opens {
                    banner = banner_delimiter(content);
                }
                opens
            }
        };

        if let Some(byte) = line.bytes().find(|&b| is_binary(b, in_banner)) {
            return Err(InputError::BinaryContent {
                line: index + 1,
                byte,
            });
        }
    }
    Ok(())
}

fn is_binary(byte: u8, in_banner: bool) -> bool {
    byte.is_ascii_control()
        && !matches!(byte, b'\t' | b'\r' | 0x0c | 0x7f)
        && !(in_banner && byte == ETX)
}

/// Delimiter of a multi-line `banner <kind> <delimiter>` body.
///
/// Returns `None` for non-banner lines and for banners closed on the same line.
fn banner_delimiter(content: &str) -> Option<&str> {
    let (first, rest) = next_token(content)?;
    if !kw::BANNER.matches(first) {
        return None;
    }
    let (_kind, rest) = next_token(rest)?;
    let rest = rest.trim_start();
    let delimiter = if rest.starts_with("^C") {
        &rest[..2]
    } else {
        let ch = rest.chars().next()?;
        &rest[..ch.len_utf8()]
    };
    let body = &rest[delimiter.len()..];
    if body.contains(delimiter) {
        None
    } else {
        Some(delimiter)
    }
}
