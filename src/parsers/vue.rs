use std::path::Path;

use super::{split_lines, Chunk, ParseError, Parser, ParserKind};

const BLOCKS: [&str; 3] = ["template", "script", "style"];

/// One chunk per top-level `<template>`, `<script>` or `<style>` block of
/// a single-file component. Nested `<template>` tags are tracked; script
/// and style bodies are treated as raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct VueParser;

/// Number of `<name ...>` opening tags in `line`.
fn count_open(line: &str, name: &str) -> usize {
    let needle = format!("<{name}");
    line.match_indices(&needle)
        .filter(|(i, _)| {
            line[i + needle.len()..]
                .chars()
                .next()
                .map_or(true, |c| c.is_whitespace() || c == '>' || c == '/')
        })
        .count()
}

fn count_close(line: &str, name: &str) -> usize {
    line.matches(&format!("</{name}>")).count()
}

fn block_opening(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    BLOCKS
        .into_iter()
        .find(|name| count_open(trimmed, name) > 0 && trimmed.starts_with(&format!("<{name}")))
}

impl Parser for VueParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Vue
    }

    fn parse(&self, content: &str, path: &Path) -> Result<Vec<Chunk>, ParseError> {
        let lines = split_lines(content);
        let mut chunks = Vec::new();
        // (block name, start line index, nesting depth)
        let mut open: Option<(&'static str, usize, isize)> = None;

        for (i, line) in lines.iter().enumerate() {
            let (name, start, depth) = match open {
                Some(block) => block,
                None => match block_opening(line) {
                    Some(name) => (name, i, 0),
                    None => continue,
                },
            };

            let depth = if name == "template" {
                depth + count_open(line, name) as isize - count_close(line, name) as isize
            } else if count_close(line, name) > 0 {
                0
            } else {
                1
            };

            if depth <= 0 {
                chunks.push(Chunk::from_lines(&lines, start, i + 1));
                open = None;
            } else {
                open = Some((name, start, depth));
            }
        }

        match open {
            Some((name, start, _)) => Err(ParseError::new(
                path,
                start + 1,
                format!("unclosed <{name}> block"),
            )),
            None => Ok(chunks),
        }
    }
}
