//! Format-preserving edits to a YAML document.
//!
//! The parsed `serde_yaml::Value` is used for lookups and counts, while edits
//! are spliced into the original text so comments, key order and indentation
//! outside the touched sequence survive a write-back. Appending to a sequence
//! is the only edit the stores need.
use regex::Regex;
use serde::Serialize;
use serde_yaml::Value;
use std::ops::Range;
use std::sync::OnceLock;

/// Default indentation step for sequences created or re-rendered here.
const INDENT_STEP: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("serialize sequence item: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("sequence '{0}' not found in document")]
    SectionNotFound(String),

    #[error("'{0}' is not a sequence")]
    NotSequence(String),

    #[error("edited document no longer parses: {0}")]
    Reparse(#[source] serde_yaml::Error),

    #[error("edited document has {actual} items at '{path}', expected {expected}")]
    CountMismatch {
        path: String,
        expected: usize,
        actual: usize,
    },
}

/// What a key path resolves to in the parsed tree.
#[derive(Debug, PartialEq)]
pub enum Section<'a> {
    Missing,
    Null,
    Items(&'a [Value]),
    NotSequence,
}

impl Section<'_> {
    /// Item count, treating an explicit `null` as empty.
    pub fn item_count(&self) -> Option<usize> {
        match self {
            Section::Null => Some(0),
            Section::Items(items) => Some(items.len()),
            Section::Missing | Section::NotSequence => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct YamlDocument {
    text: String,
    root: Value,
}

impl YamlDocument {
    /// Parse a single YAML document. Blank or comment-only text is a `null` root.
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        let root = parse_root(text)?;
        Ok(Self {
            text: text.to_string(),
            root,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Resolve a key path; an empty path addresses the root itself.
    pub fn section(&self, path: &[&str]) -> Section<'_> {
        let node = path
            .iter()
            .try_fold(&self.root, |node, key| node.get(*key));
        match node {
            None => Section::Missing,
            Some(Value::Null) => Section::Null,
            Some(Value::Sequence(items)) => Section::Items(items),
            Some(_) => Section::NotSequence,
        }
    }

    /// Append `items` to the sequence at `path` and return the new item count.
    ///
    /// New entries go after the last existing entry in block style. A flow
    /// sequence (`[]` or `[a, b]`) or an explicit `null` is rewritten as a
    /// block sequence first. The document is left untouched if anything fails.
    pub fn append<T: Serialize>(
        &mut self,
        path: &[&str],
        items: &[T],
    ) -> Result<usize, DocumentError> {
        let (existing, null_section): (Vec<Value>, bool) = match self.section(path) {
            Section::Items(current) => (current.to_vec(), false),
            Section::Null => (Vec::new(), true),
            Section::Missing => return Err(DocumentError::SectionNotFound(path.join("."))),
            Section::NotSequence => return Err(DocumentError::NotSequence(path.join("."))),
        };
        if items.is_empty() {
            return Ok(existing.len());
        }

        let newline = if self.text.contains("\r\n") { "\r\n" } else { "\n" };
        let lines: Vec<&str> = self.text.lines().collect();
        let target = locate_sequence(&lines, path, null_section)?;
        tracing::debug!(
            path = %path.join("."),
            insert_at = target.insert_at,
            indent = target.indent,
            replace = target.replace.is_some(),
            "appending sequence items"
        );

        let mut entries = Vec::new();
        if target.replace.is_some() {
            for value in &existing {
                entries.extend(render_entry(value, target.indent)?);
            }
        }
        for item in items {
            entries.extend(render_entry(item, target.indent)?);
        }

        let mut edited: Vec<String> = Vec::with_capacity(lines.len() + entries.len());
        match &target.replace {
            Some(flow) => {
                edited.extend(lines[..flow.lines.start].iter().map(|l| l.to_string()));
                edited.extend(flow.head.iter().cloned());
                edited.extend(entries);
                edited.extend(lines[flow.lines.end..].iter().map(|l| l.to_string()));
            }
            None => {
                edited.extend(lines[..target.insert_at].iter().map(|l| l.to_string()));
                edited.extend(entries);
                edited.extend(lines[target.insert_at..].iter().map(|l| l.to_string()));
            }
        }

        let mut text = edited.join(newline);
        if self.text.is_empty() || self.text.ends_with('\n') {
            text.push_str(newline);
        }

        let root = parse_root(&text).map_err(DocumentError::Reparse)?;
        let expected = existing.len() + items.len();
        let edited_doc = Self { text, root };
        let actual = edited_doc.section(path).item_count().unwrap_or(0);
        if actual != expected {
            return Err(DocumentError::CountMismatch {
                path: path.join("."),
                expected,
                actual,
            });
        }
        *self = edited_doc;
        Ok(actual)
    }
}

fn parse_root(text: &str) -> Result<Value, serde_yaml::Error> {
    let lines: Vec<&str> = text.lines().collect();
    if first_content(&lines, 0..lines.len()).is_none() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text)
}

/// Where and how new entries are spliced in.
struct SequenceTarget {
    insert_at: usize,
    indent: usize,
    replace: Option<FlowReplacement>,
}

/// Lines holding a flow or `null` value, replaced by a block rendering.
struct FlowReplacement {
    lines: Range<usize>,
    /// Lines written ahead of the entries: the bare key line, a document
    /// marker or a comment carried over from the replaced lines.
    head: Vec<String>,
}

struct KeyLine {
    index: usize,
    indent: usize,
    head: String,
    value: String,
    comment: Option<String>,
}

fn locate_sequence(
    lines: &[&str],
    path: &[&str],
    null_section: bool,
) -> Result<SequenceTarget, DocumentError> {
    if path.is_empty() {
        return Ok(locate_root_sequence(lines, null_section));
    }

    let mut scope = 0..lines.len();
    let mut found = None;
    for key in path {
        let key_line = find_key(lines, scope.clone(), key)
            .ok_or_else(|| DocumentError::SectionNotFound(path.join(".")))?;
        let end = block_end(lines, &key_line, scope.end);
        scope = key_line.index + 1..end;
        found = Some(key_line);
    }
    let Some(key_line) = found else {
        return Err(DocumentError::SectionNotFound(path.join(".")));
    };

    let flow = key_line.value.starts_with('[');
    if flow || (null_section && !key_line.value.is_empty()) {
        let last = if flow {
            flow_close(lines, key_line.index)
                .or_else(|| last_content(lines, scope.clone()))
                .unwrap_or(key_line.index)
        } else {
            key_line.index
        };
        let head = match &key_line.comment {
            Some(comment) => format!("{} {comment}", key_line.head),
            None => key_line.head.clone(),
        };
        return Ok(SequenceTarget {
            insert_at: key_line.index,
            indent: key_line.indent + INDENT_STEP,
            replace: Some(FlowReplacement {
                lines: key_line.index..last.max(key_line.index) + 1,
                head: vec![head],
            }),
        });
    }
    if !key_line.value.is_empty() {
        return Err(DocumentError::NotSequence(path.join(".")));
    }

    let indent = first_content(lines, scope.clone())
        .filter(|idx| is_sequence_item(lines[*idx]))
        .map(|idx| indent_of(lines[idx]))
        .unwrap_or(key_line.indent + INDENT_STEP);
    let insert_at = last_content(lines, scope).map_or(key_line.index + 1, |idx| idx + 1);
    Ok(SequenceTarget {
        insert_at,
        indent,
        replace: None,
    })
}

fn locate_root_sequence(lines: &[&str], null_root: bool) -> SequenceTarget {
    let content = 0..lines.len();
    let Some(first) = first_content(lines, content.clone()) else {
        return SequenceTarget {
            insert_at: lines.len(),
            indent: 0,
            replace: None,
        };
    };
    let (marker, payload) = split_marker(lines[first]);
    let flow = payload.trim_start().starts_with('[');
    if !flow && !null_root {
        let last = last_content(lines, content).unwrap_or(first);
        return SequenceTarget {
            insert_at: last + 1,
            indent: indent_of(lines[first]),
            replace: None,
        };
    }

    let last = if flow {
        flow_close(lines, first)
            .or_else(|| last_content(lines, content))
            .unwrap_or(first)
    } else {
        last_content(lines, content).unwrap_or(first)
    };
    let (_, comment) = split_comment(payload);
    let head = match (marker, comment) {
        (Some(marker), Some(comment)) => vec![format!("{marker} {comment}")],
        (Some(marker), None) => vec![marker.to_string()],
        (None, Some(comment)) => vec![comment.to_string()],
        (None, None) => Vec::new(),
    };
    SequenceTarget {
        insert_at: first,
        indent: 0,
        replace: Some(FlowReplacement {
            lines: first..last.max(first) + 1,
            head,
        }),
    }
}

/// Find `key:` among the mapping entries of `scope`.
fn find_key(lines: &[&str], scope: Range<usize>, key: &str) -> Option<KeyLine> {
    let mapping_indent = indent_of(lines[first_content(lines, scope.clone())?]);
    for index in scope {
        let line = lines[index];
        if is_trivia(line) || indent_of(line) != mapping_indent || is_sequence_item(line) {
            continue;
        }
        let Some(caps) = key_pattern().captures(line) else {
            continue;
        };
        let raw_key = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        if unquote(raw_key) != key {
            continue;
        }
        let head_end = caps.get(3).map_or(line.len(), |m| m.end());
        let rest = caps.get(4).map(|m| m.as_str()).unwrap_or_default();
        let (value, comment) = split_comment(rest);
        return Some(KeyLine {
            index,
            indent: mapping_indent,
            head: line[..head_end].trim_end().to_string(),
            value: value.to_string(),
            comment: comment.map(|c| c.to_string()),
        });
    }
    None
}

/// First line after `key` that no longer belongs to its value.
fn block_end(lines: &[&str], key: &KeyLine, scope_end: usize) -> usize {
    for (index, line) in lines
        .iter()
        .enumerate()
        .take(scope_end)
        .skip(key.index + 1)
    {
        if is_document_marker(line) {
            return index;
        }
        if is_trivia(line) {
            continue;
        }
        let indent = indent_of(line);
        if indent < key.indent || (indent == key.indent && !is_sequence_item(line)) {
            return index;
        }
    }
    scope_end
}

/// Line holding the `]` that closes the flow sequence opened on `start`.
fn flow_close(lines: &[&str], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, line) in lines.iter().enumerate().skip(start) {
        let (code, _) = split_comment(line);
        let mut quote = None;
        for ch in code.chars() {
            match (quote, ch) {
                (None, '"') | (None, '\'') => quote = Some(ch),
                (Some(open), _) if ch == open => quote = None,
                (None, '[') => depth += 1,
                (None, ']') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

fn first_content(lines: &[&str], mut range: Range<usize>) -> Option<usize> {
    range.find(|idx| has_payload(lines[*idx]))
}

fn last_content(lines: &[&str], mut range: Range<usize>) -> Option<usize> {
    range.rfind(|idx| has_payload(lines[*idx]))
}

/// Whether a line carries document content, including a `--- value` line.
fn has_payload(line: &str) -> bool {
    if is_trivia(line) {
        return false;
    }
    match split_marker(line) {
        (Some(_), payload) => !is_trivia(payload),
        (None, _) => !is_document_marker(line),
    }
}

/// Split a `---` start marker from the content that follows it on the same line.
fn split_marker(line: &str) -> (Option<&str>, &str) {
    match line.strip_prefix("---") {
        Some(rest) if rest.is_empty() || rest.starts_with([' ', '\t']) => (Some("---"), rest),
        _ => (None, line),
    }
}

/// Serialize one item as a block sequence entry at `indent`.
fn render_entry<T: Serialize + ?Sized>(
    item: &T,
    indent: usize,
) -> Result<Vec<String>, DocumentError> {
    let rendered = serde_yaml::to_string(item).map_err(DocumentError::Serialize)?;
    let pad = " ".repeat(indent);
    let lines = rendered
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 {
                format!("{pad}- {line}")
            } else if line.is_empty() {
                String::new()
            } else {
                format!("{pad}  {line}")
            }
        })
        .collect();
    Ok(lines)
}

/// Split a trailing `# comment` off a value, ignoring `#` inside quotes.
fn split_comment(rest: &str) -> (&str, Option<&str>) {
    let mut quote = None;
    let mut prev_is_space = true;
    for (idx, ch) in rest.char_indices() {
        match (quote, ch) {
            (None, '"') | (None, '\'') => quote = Some(ch),
            (Some(open), _) if ch == open => quote = None,
            (None, '#') if prev_is_space => {
                return (rest[..idx].trim_end(), Some(&rest[idx..]));
            }
            _ => {}
        }
        prev_is_space = ch.is_whitespace();
    }
    (rest.trim_end(), None)
}

fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_trivia(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn is_document_marker(line: &str) -> bool {
    line.starts_with("---") || line.starts_with("...")
}

fn is_sequence_item(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed == "-" || trimmed.starts_with("- ")
}

fn key_pattern() -> &'static Regex {
    static KEY_PATTERN: OnceLock<Regex> = OnceLock::new();
    KEY_PATTERN.get_or_init(|| {
        Regex::new(r#"^( *)("(?:[^"\\]|\\.)*"|'[^']*'|[^\s#'"\[\]{},][^#]*?)\s*(:)(?:\s+(.*))?$"#)
            .expect("regex for mapping keys")
    })
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
