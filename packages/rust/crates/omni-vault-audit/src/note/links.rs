//! Wikilink extraction.
//!
//! Recognizes `[[target]]`, `[[target|alias]]`, `[[target#section]]` and the
//! embed form `![[target]]`. Only the trimmed `target` segment is returned.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::paths::{normalize_slashes, trim_md_extension};

pub(super) fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

// A token may not span lines or contain nested brackets; anything else between
// `[[` and `]]` is the inner text.
static WIKILINK_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"\[\[([^\[\]\n]+)\]\]"));

/// One parsed wikilink token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WikiLink {
    /// Referenced note name.
    pub target: String,
    /// Display alias after `|`.
    pub alias: Option<String>,
    /// Heading or block reference after `#`.
    pub section: Option<String>,
    /// Byte offset of the opening brackets.
    pub offset: usize,
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_inner(inner: &str, offset: usize) -> Option<WikiLink> {
    let (left, alias) = match inner.split_once('|') {
        // Pipes inside markdown tables are escaped as `\|`.
        Some((left, alias)) => (left.strip_suffix('\\').unwrap_or(left), non_empty(alias)),
        None => (inner, None),
    };
    let (target, section) = match left.split_once('#') {
        Some((target, section)) => (target, non_empty(section)),
        None => (left, None),
    };
    let normalized = normalize_slashes(target.trim());
    let target = non_empty(trim_md_extension(&normalized))?;
    Some(WikiLink {
        target,
        alias,
        section,
        offset,
    })
}

/// Parse every well-formed wikilink token in `content`, in source order.
#[must_use]
pub fn parse_wikilinks(content: &str) -> Vec<WikiLink> {
    WIKILINK_REGEX
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            parse_inner(inner.as_str(), whole.start())
        })
        .collect()
}

/// Referenced note names in order of appearance, duplicates preserved.
///
/// Unterminated tokens and tokens with an empty target (`[[#heading]]`,
/// `[[ | alias]]`) are skipped.
#[must_use]
pub fn extract_links(content: &str) -> Vec<String> {
    parse_wikilinks(content)
        .into_iter()
        .map(|link| link.target)
        .collect()
}
