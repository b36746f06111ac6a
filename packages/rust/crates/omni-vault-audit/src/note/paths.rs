use std::path::Path;

pub(crate) fn normalize_slashes(raw: &str) -> String {
    raw.replace('\\', "/")
}

pub(crate) fn trim_md_extension(raw: &str) -> &str {
    let lower = raw.to_lowercase();
    for ext in [".markdown", ".mdx", ".md"] {
        if lower.ends_with(ext) {
            return &raw[..raw.len().saturating_sub(ext.len())];
        }
    }
    raw
}

/// Display name of a note: file name without its extension.
#[must_use]
pub fn display_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    // `note.md.bak` keeps the name `note`.
    let stem = trim_md_extension(stem.trim()).trim();
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Whether file extension is a supported note format.
#[must_use]
pub fn is_supported_note(path: &Path) -> bool {
    path.extension()
        .and_then(|v| v.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_lowercase();
            matches!(lower.as_str(), "md" | "markdown" | "mdx")
        })
}

pub(crate) fn contains_backup_suffix(path: &Path, suffixes: &[String]) -> bool {
    let raw = normalize_slashes(&path.to_string_lossy()).to_lowercase();
    suffixes
        .iter()
        .filter(|suffix| !suffix.is_empty())
        .any(|suffix| raw.contains(&suffix.to_lowercase()))
}
