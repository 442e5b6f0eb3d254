//! Parser capability.
//!
//! A parser turns file content into an ordered sequence of [`Chunk`]s.
//! Parsers are looked up by their text identifier through a
//! [`ParserRegistry`]; the set of identifiers is closed ([`ParserKind`]).

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::error::{HarnessError, Result};

pub mod code;
pub mod markdown;
pub mod vue;
pub mod yaml;

pub use code::CodeParser;
pub use markdown::MarkdownParser;
pub use vue::VueParser;
pub use yaml::YamlParser;

/// A span of text extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub content: String,
    /// 1-based, inclusive.
    pub start_line: usize,
    /// 1-based, inclusive.
    pub end_line: usize,
}

impl Chunk {
    /// Build a chunk from `lines[start..end]` (0-based, exclusive end).
    pub(crate) fn from_lines(lines: &[&str], start: usize, end: usize) -> Self {
        Self {
            content: lines[start..end].join("\n"),
            start_line: start + 1,
            end_line: end,
        }
    }

    /// Length in characters, not bytes.
    pub fn len_chars(&self) -> usize {
        self.content.chars().count()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path}:{line}: {message}")]
pub struct ParseError {
    pub path: String,
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(path: &Path, line: usize, message: impl Into<String>) -> Self {
        Self {
            path: path.display().to_string(),
            line,
            message: message.into(),
        }
    }
}

pub trait Parser {
    fn kind(&self) -> ParserKind;

    fn parse(&self, content: &str, path: &Path) -> std::result::Result<Vec<Chunk>, ParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParserKind {
    Markdown,
    Yaml,
    Vue,
    Code,
}

impl ParserKind {
    pub const ALL: [ParserKind; 4] = [
        ParserKind::Markdown,
        ParserKind::Yaml,
        ParserKind::Vue,
        ParserKind::Code,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParserKind::Markdown => "markdown",
            ParserKind::Yaml => "yaml",
            ParserKind::Vue => "vue",
            ParserKind::Code => "code",
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParserKind {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        ParserKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| HarnessError::UnknownParser(s.to_string()))
    }
}

pub type ParserCtor = fn() -> Box<dyn Parser>;

/// Maps each [`ParserKind`] to a constructor.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    ctors: BTreeMap<ParserKind, ParserCtor>,
}

impl ParserRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the four built-in parsers.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        reg.register(ParserKind::Markdown, || Box::new(MarkdownParser));
        reg.register(ParserKind::Yaml, || Box::new(YamlParser));
        reg.register(ParserKind::Vue, || Box::new(VueParser));
        reg.register(ParserKind::Code, || Box::new(CodeParser));
        reg
    }

    pub fn register(&mut self, kind: ParserKind, ctor: ParserCtor) {
        self.ctors.insert(kind, ctor);
    }

    /// Construct the parser registered under `identifier`.
    pub fn construct(&self, identifier: &str) -> Result<Box<dyn Parser>> {
        let kind: ParserKind = identifier.parse()?;
        let ctor = self
            .ctors
            .get(&kind)
            .ok_or(HarnessError::UnregisteredParser(kind))?;
        Ok(ctor())
    }

    /// Identifiers among `identifiers` that [`construct`](Self::construct)
    /// would reject, in input order.
    pub fn unresolved<'a>(&self, identifiers: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        identifiers
            .into_iter()
            .filter(|id| self.construct(id).is_err())
            .collect()
    }
}

/// Split content into lines without trailing `\r`.
pub(crate) fn split_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

/// Trim blank lines off both ends of `lines[start..end]`.
pub(crate) fn trim_blank(lines: &[&str], mut start: usize, mut end: usize) -> Option<(usize, usize)> {
    while start < end && lines[start].trim().is_empty() {
        start += 1;
    }
    while end > start && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    (start < end).then_some((start, end))
}
