use regex::Regex;
use serde::ser::{Serialize, Serializer};
use serde_yaml::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::links::compile_regex;

/// Ordered key/value view of a note's frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontmatterMeta(Vec<(String, String)>);

impl FrontmatterMeta {
    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entries were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FrontmatterMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Outcome of splitting and parsing a leading frontmatter block.
#[derive(Debug, Clone)]
pub(crate) struct FrontmatterParse<'a> {
    /// Parsed YAML mapping (`None` when absent or malformed).
    pub value: Option<Value>,
    /// Content after the block.
    pub body: &'a str,
    /// Parser failure for a block that is present but unusable.
    pub error: Option<String>,
}

// Group 1 is absent for an empty block.
static FRONTMATTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)??(?:---|\.\.\.)[ \t]*(?:\r?\n|\z)")
});

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"\w+"));

const MIN_TERM_CHARS: usize = 4;

enum FrontmatterBlock<'a> {
    Absent,
    Present { yaml: &'a str, body: &'a str },
    Unterminated,
}

fn split_frontmatter(content: &str) -> FrontmatterBlock<'_> {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);
    if let Some(caps) = FRONTMATTER_REGEX.captures(text) {
        let body_start = caps.get(0).map_or(0, |m| m.end());
        return FrontmatterBlock::Present {
            yaml: caps.get(1).map_or("", |m| m.as_str()),
            body: &text[body_start..],
        };
    }
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.trim_end() == "---" && text.contains('\n') {
        FrontmatterBlock::Unterminated
    } else {
        FrontmatterBlock::Absent
    }
}

/// Note text after a leading frontmatter block; the whole text when there is none.
#[must_use]
pub fn note_body(content: &str) -> &str {
    match split_frontmatter(content) {
        FrontmatterBlock::Present { body, .. } => body,
        FrontmatterBlock::Absent | FrontmatterBlock::Unterminated => content,
    }
}

pub(crate) fn parse_frontmatter(content: &str) -> FrontmatterParse<'_> {
    match split_frontmatter(content) {
        FrontmatterBlock::Absent => FrontmatterParse {
            value: None,
            body: content,
            error: None,
        },
        FrontmatterBlock::Unterminated => FrontmatterParse {
            value: None,
            body: content,
            error: Some("frontmatter block is not terminated".to_string()),
        },
        FrontmatterBlock::Present { yaml, body } => {
            match serde_yaml::from_str::<Value>(yaml) {
                Ok(Value::Null) => FrontmatterParse {
                    value: None,
                    body,
                    error: None,
                },
                Ok(value @ Value::Mapping(_)) => FrontmatterParse {
                    value: Some(value),
                    body,
                    error: None,
                },
                Ok(_) => FrontmatterParse {
                    value: None,
                    body,
                    error: Some("frontmatter is not a key/value mapping".to_string()),
                },
                Err(e) => FrontmatterParse {
                    value: None,
                    body,
                    error: Some(e.to_string()),
                },
            }
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(raw) => raw.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Mapping(_) | Value::Tagged(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

pub(crate) fn extract_meta(frontmatter: Option<&Value>) -> FrontmatterMeta {
    let Some(Value::Mapping(mapping)) = frontmatter else {
        return FrontmatterMeta::default();
    };
    FrontmatterMeta(
        mapping
            .iter()
            .map(|(key, value)| (value_to_string(key), value_to_string(value)))
            .collect(),
    )
}

fn clean_tag(raw: &str) -> Option<String> {
    let tag = raw.trim().trim_start_matches('#').trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

pub(crate) fn extract_tags(frontmatter: Option<&Value>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let Some(tags_val) = frontmatter.and_then(|value| value.get("tags")) else {
        return out;
    };
    match tags_val {
        Value::String(s) => out.extend(s.split(',').filter_map(clean_tag)),
        Value::Sequence(seq) => out.extend(seq.iter().filter_map(Value::as_str).filter_map(clean_tag)),
        _ => {}
    }
    out.sort();
    out.dedup();
    out
}

pub(crate) fn count_words(body: &str) -> usize {
    body.split_whitespace().count()
}

pub(crate) fn count_terms(body: &str) -> HashMap<String, usize> {
    let lowered = body.to_lowercase();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in WORD_REGEX.find_iter(&lowered).map(|m| m.as_str()) {
        if word.chars().count() >= MIN_TERM_CHARS {
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }
    counts
}
