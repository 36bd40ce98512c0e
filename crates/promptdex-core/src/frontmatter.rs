use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::models::{Category, Prompt};

/// Recognized front-matter keys. Anything else in the header block is
/// dropped by the deserializer rather than rejected.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

/// Reads one markdown file into a [`Prompt`]. Callers that scan whole trees
/// treat any error here as "no record" for that file.
pub fn parse_prompt_file(path: &Path, category: Category, subcategory: &str) -> Result<Prompt> {
    let raw = fs::read_to_string(path)?;
    build_prompt(path, category, subcategory, &raw)
}

fn build_prompt(
    path: &Path,
    category: Category,
    subcategory: &str,
    raw: &str,
) -> Result<Prompt> {
    let (header, body) = split_front_matter(raw);
    let meta = match header {
        Some(block) if !block.trim().is_empty() => serde_norway::from_str::<FrontMatter>(block)?,
        _ => FrontMatter::default(),
    };

    let stem = file_stem(path);
    let title = meta
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| title_from_stem(&stem));

    Ok(Prompt {
        id: format!("{category}/{subcategory}/{stem}"),
        title,
        description: meta.description.unwrap_or_default(),
        tags: meta.tags,
        aliases: meta.aliases,
        category,
        subcategory: subcategory.to_string(),
        content: body.trim().to_string(),
        file_path: path.to_path_buf(),
    })
}

/// Splits an optional leading `---` block from the body. An opening fence
/// without a closing one is treated as plain body text.
fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, text);
    };
    if first.trim_end() != "---" {
        return (None, text);
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == "---" {
            let header = &text[header_start..offset];
            let body = &text[offset + line.len()..];
            return (Some(header), body);
        }
        offset += line.len();
    }
    (None, text)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `prd-generator` becomes `Prd Generator`.
fn title_from_stem(stem: &str) -> String {
    stem.replace('-', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
