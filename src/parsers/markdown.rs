use std::path::Path;

use super::{split_lines, trim_blank, Chunk, ParseError, Parser, ParserKind};

/// One chunk per ATX heading section. Text before the first heading is
/// its own chunk. Headings inside fenced code blocks do not split.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser;

fn is_heading(line: &str) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes)
        && trimmed[hashes..]
            .chars()
            .next()
            .map_or(true, |c| c == ' ' || c == '\t')
}

/// Leading run of a code fence: the fence character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    ch: char,
    len: usize,
}

impl Fence {
    fn parse(line: &str) -> Option<(Fence, &str)> {
        let trimmed = line.trim_start();
        let ch = trimmed.chars().next().filter(|&c| c == '`' || c == '~')?;
        let len = trimmed.chars().take_while(|&c| c == ch).count();
        (len >= 3).then(|| (Fence { ch, len }, &trimmed[len..]))
    }

    /// A closing fence uses the same character, is at least as long as the
    /// opening run and carries no info string.
    fn is_closed_by(&self, line: &str) -> bool {
        match Fence::parse(line) {
            Some((close, rest)) => close.ch == self.ch && close.len >= self.len && rest.trim().is_empty(),
            None => false,
        }
    }
}

impl Parser for MarkdownParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Markdown
    }

    fn parse(&self, content: &str, path: &Path) -> Result<Vec<Chunk>, ParseError> {
        let lines = split_lines(content);
        let mut starts = vec![0];
        let mut open_fence: Option<(Fence, usize)> = None;

        for (i, line) in lines.iter().enumerate() {
            match open_fence {
                Some((fence, _)) if fence.is_closed_by(line) => open_fence = None,
                Some(_) => {}
                None => match Fence::parse(line) {
                    Some((fence, _)) => open_fence = Some((fence, i)),
                    None if i > 0 && is_heading(line) => starts.push(i),
                    None => {}
                },
            }
        }

        if let Some((_, line)) = open_fence {
            return Err(ParseError::new(path, line + 1, "unterminated code fence"));
        }

        starts.push(lines.len());
        Ok(starts
            .windows(2)
            .filter_map(|w| trim_blank(&lines, w[0], w[1]))
            .map(|(s, e)| Chunk::from_lines(&lines, s, e))
            .collect())
    }
}
