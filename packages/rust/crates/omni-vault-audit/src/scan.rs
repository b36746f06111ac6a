//! Filesystem walk that turns a vault directory into [`NoteInput`]s.

use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::note::{NoteInput, NoteStat, is_supported_note};

const DEFAULT_EXCLUDED_DIR_NAMES: &[&str] = &[
    ".git",
    ".obsidian",
    ".trash",
    ".cache",
    ".venv",
    "venv",
    "target",
    "node_modules",
];

/// Directory walk options.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Extra directory names to skip, matched case-insensitively.
    pub excluded_dirs: Vec<String>,
    /// Skip entries whose name starts with `.`.
    pub skip_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            excluded_dirs: Vec::new(),
            skip_hidden: true,
        }
    }
}

impl ScanOptions {
    /// Add directory names to skip.
    #[must_use]
    pub fn with_excluded_dirs(mut self, dirs: &[String]) -> Self {
        self.excluded_dirs.extend(dirs.iter().cloned());
        self
    }

    fn excluded_set(&self) -> HashSet<String> {
        DEFAULT_EXCLUDED_DIR_NAMES
            .iter()
            .map(|name| (*name).to_string())
            .chain(self.excluded_dirs.iter().cloned())
            .filter_map(|name| {
                let trimmed = name.trim().trim_matches('/').to_lowercase();
                (!trimmed.is_empty()).then_some(trimmed)
            })
            .collect()
    }
}

fn should_skip_entry(
    path: &Path,
    is_dir: bool,
    root: &Path,
    options: &ScanOptions,
    excluded: &HashSet<String>,
) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    let components: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    let last = components.len().saturating_sub(1);
    components.iter().enumerate().any(|(idx, component)| {
        if options.skip_hidden && component.starts_with('.') {
            return true;
        }
        let is_dir_component = is_dir || idx < last;
        is_dir_component && excluded.contains(component.to_lowercase().as_str())
    })
}

/// Markdown notes under `root`, sorted by path.
pub fn discover_notes(root: &Path, options: &ScanOptions) -> std::io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("vault root is not a directory: {}", root.display()),
        ));
    }
    let excluded = options.excluded_set();
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            !should_skip_entry(
                entry.path(),
                entry.file_type().is_dir(),
                root,
                options,
                &excluded,
            )
        })
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable directory entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_file() && is_supported_note(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    log::debug!("discovered {} notes under {}", paths.len(), root.display());
    Ok(paths)
}

/// Read one note; any I/O failure becomes [`NoteInput::Unreadable`].
#[must_use]
pub fn load_note(path: &Path) -> NoteInput {
    let loaded = fs::metadata(path)
        .and_then(|meta| NoteStat::from_metadata(&meta))
        .and_then(|stat| fs::read_to_string(path).map(|content| (content, stat)));
    match loaded {
        Ok((content, stat)) => NoteInput::loaded(path, content, stat),
        Err(e) => NoteInput::unreadable(path, e.to_string()),
    }
}

/// Discover and read every note under `root`, preserving discovery order.
pub fn load_vault(root: &Path, options: &ScanOptions) -> std::io::Result<Vec<NoteInput>> {
    let paths = discover_notes(root, options)?;
    Ok(paths.par_iter().map(|path| load_note(path)).collect())
}
