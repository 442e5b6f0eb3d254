use std::path::Path;

use serde::Deserialize;

use super::{split_lines, trim_blank, Chunk, ParseError, Parser, ParserKind};

/// One chunk per top-level entry (a key or sequence item starting at
/// column 0). Comments directly above an entry belong to it; `---` and
/// `...` end the current chunk. The whole input must be valid YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

fn is_separator(line: &str) -> bool {
    let t = line.trim_end();
    t == "---" || t == "..." || t.starts_with("--- ")
}

fn starts_entry(line: &str) -> bool {
    match line.chars().next() {
        Some(c) => !c.is_whitespace() && c != '#' && c != '%' && !is_separator(line),
        None => false,
    }
}

fn validate(content: &str, path: &Path) -> Result<(), ParseError> {
    for doc in serde_yaml::Deserializer::from_str(content) {
        serde_yaml::Value::deserialize(doc).map_err(|e| {
            let line = e.location().map_or(0, |loc| loc.line());
            ParseError::new(path, line, e.to_string())
        })?;
    }
    Ok(())
}

impl Parser for YamlParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Yaml
    }

    fn parse(&self, content: &str, path: &Path) -> Result<Vec<Chunk>, ParseError> {
        validate(content, path)?;

        let lines = split_lines(content);
        let mut spans = Vec::new();
        let mut start = 0;

        for (i, line) in lines.iter().enumerate() {
            if is_separator(line) {
                spans.push((start, i));
                start = i + 1;
            } else if starts_entry(line) && lines[start..i].iter().any(|l| starts_entry(l)) {
                // Comment lines directly above an entry lead it.
                let mut split = i;
                while split > start && lines[split - 1].starts_with('#') {
                    split -= 1;
                }
                spans.push((start, split));
                start = split;
            }
        }
        spans.push((start, lines.len()));

        Ok(spans
            .into_iter()
            .filter_map(|(s, e)| trim_blank(&lines, s, e))
            .map(|(s, e)| Chunk::from_lines(&lines, s, e))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(src: &str) -> Vec<String> {
        YamlParser
            .parse(src, Path::new("t.yaml"))
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect()
    }

    #[test]
    fn test_top_level_keys_split() {
        let src = "name: app\nservices:\n  web:\n    image: nginx\n\n# db settings\ndb:\n  port: 5432\n";
        assert_eq!(
            contents(src),
            vec![
                "name: app",
                "services:\n  web:\n    image: nginx",
                "# db settings\ndb:\n  port: 5432",
            ]
        );
    }

    #[test]
    fn test_document_separators() {
        let src = "---\na: 1\n---\nb: 2\n";
        assert_eq!(contents(src), vec!["a: 1", "b: 2"]);
    }

    #[test]
    fn test_sequence_items() {
        assert_eq!(contents("- a\n- b: 1\n  c: 2\n"), vec!["- a", "- b: 1\n  c: 2"]);
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let err = YamlParser
            .parse("a: [1, 2\nb: 3\n", Path::new("bad.yaml"))
            .unwrap_err();
        assert_eq!(err.path, "bad.yaml");
        assert!(!err.message.is_empty());
    }
}
