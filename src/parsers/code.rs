use std::path::Path;

use super::{split_lines, trim_blank, Chunk, ParseError, Parser, ParserKind};

/// Language-agnostic chunker for C-family source.
///
/// Splits on blank lines at brace depth zero, so a type or function body
/// is never cut in half. Braces inside string/char literals and comments
/// are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeParser;

#[derive(Debug, Default)]
struct BraceScanner {
    depth: isize,
    in_block_comment: bool,
    /// Line where the outermost open brace was seen.
    opened_at: usize,
}

impl BraceScanner {
    /// Update depth with one line. Returns the first line on which depth
    /// went negative, if any.
    fn scan_line(&mut self, line: &str, line_no: usize) -> Result<(), usize> {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if self.in_block_comment {
                if c == '*' && next == Some('/') {
                    self.in_block_comment = false;
                    i += 1;
                }
                i += 1;
                continue;
            }

            match c {
                '/' if next == Some('/') => break,
                '/' if next == Some('*') => {
                    self.in_block_comment = true;
                    i += 1;
                }
                '"' => i = skip_string(&chars, i),
                '\'' => i = skip_char_literal(&chars, i),
                '{' => {
                    if self.depth == 0 {
                        self.opened_at = line_no;
                    }
                    self.depth += 1;
                }
                '}' => {
                    self.depth -= 1;
                    if self.depth < 0 {
                        return Err(line_no);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        Ok(())
    }
}

/// Index of the closing quote of the string starting at `start`, or the
/// last index when it runs to end of line.
fn skip_string(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '"' => return i,
            _ => {}
        }
        i += 1;
    }
    chars.len()
}

/// `'x'` or `'\x'` is skipped; a lone quote (e.g. a Rust lifetime) is not.
fn skip_char_literal(chars: &[char], start: usize) -> usize {
    let close = if chars.get(start + 1) == Some(&'\\') {
        start + 3
    } else {
        start + 2
    };
    if chars.get(close) == Some(&'\'') {
        close
    } else {
        start
    }
}

impl Parser for CodeParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Code
    }

    fn parse(&self, content: &str, path: &Path) -> Result<Vec<Chunk>, ParseError> {
        let lines = split_lines(content);
        let mut scanner = BraceScanner::default();
        let mut spans = Vec::new();
        let mut start = 0;

        for (i, line) in lines.iter().enumerate() {
            scanner
                .scan_line(line, i + 1)
                .map_err(|n| ParseError::new(path, n, "unbalanced '}'"))?;

            if scanner.depth == 0 && !scanner.in_block_comment && line.trim().is_empty() {
                spans.push((start, i));
                start = i + 1;
            }
        }
        spans.push((start, lines.len()));

        if scanner.depth > 0 {
            return Err(ParseError::new(path, scanner.opened_at, "unclosed '{'"));
        }
        if scanner.in_block_comment {
            return Err(ParseError::new(path, lines.len(), "unterminated block comment"));
        }

        Ok(spans
            .into_iter()
            .filter_map(|(s, e)| trim_blank(&lines, s, e))
            .map(|(s, e)| Chunk::from_lines(&lines, s, e))
            .collect())
    }
}
