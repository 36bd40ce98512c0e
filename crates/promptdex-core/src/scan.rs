use std::path::Path;

use walkdir::WalkDir;

use crate::frontmatter::parse_prompt_file;
use crate::models::{Category, Prompt};

pub(crate) const GENERAL_SUBCATEGORY: &str = "general";

const MARKDOWN_SUFFIX: &str = ".md";

/// Collects every prompt beneath one category root. Unreadable entries and
/// malformed files are skipped, never fatal; a missing root yields nothing.
pub(crate) fn scan_category(library_root: &Path, category: Category) -> Vec<Prompt> {
    let category_root = library_root.join(category.dir_name());
    if !category_root.is_dir() {
        return Vec::new();
    }

    let mut prompts = Vec::new();
    for entry in WalkDir::new(&category_root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry under {category}: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        // Underscore names are reserved for non-prompt index/readme files.
        if name.starts_with('_') || !name.ends_with(MARKDOWN_SUFFIX) {
            continue;
        }

        let subcategory = subcategory_for(&category_root, entry.path());
        match parse_prompt_file(entry.path(), category, &subcategory) {
            Ok(prompt) => prompts.push(prompt),
            Err(err) => {
                log::warn!("skipping {}: {err}", entry.path().display());
            }
        }
    }
    prompts
}

/// First directory level under the category root, flattened for deeper
/// nesting; files at the root itself get the "general" sentinel.
fn subcategory_for(category_root: &Path, path: &Path) -> String {
    path.parent()
        .and_then(|dir| dir.strip_prefix(category_root).ok())
        .and_then(|rel| rel.components().next())
        .and_then(|component| component.as_os_str().to_str())
        .map_or_else(|| GENERAL_SUBCATEGORY.to_string(), ToString::to_string)
}
