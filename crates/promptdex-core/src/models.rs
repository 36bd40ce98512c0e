use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Closed set of top-level library directories. `ALL` fixes the enumeration
/// order used both for index building and for prefixed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Prompts,
    Snippets,
    Templates,
    Skills,
    Instructions,
    Chains,
    Contexts,
    Examples,
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Prompts,
        Self::Snippets,
        Self::Templates,
        Self::Skills,
        Self::Instructions,
        Self::Chains,
        Self::Contexts,
        Self::Examples,
    ];

    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Prompts => "prompts",
            Self::Snippets => "snippets",
            Self::Templates => "templates",
            Self::Skills => "skills",
            Self::Instructions => "instructions",
            Self::Chains => "chains",
            Self::Contexts => "contexts",
            Self::Examples => "examples",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.dir_name() == normalized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One indexed markdown document: front-matter fields plus the stripped body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub aliases: Vec<String>,
    pub category: Category,
    pub subcategory: String,
    pub content: String,
    /// Provenance only; never used for equality or lookup.
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub prompt: Prompt,
    /// Summed field weights; ordering key only, not normalized.
    pub score: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub category: Option<Category>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
}
