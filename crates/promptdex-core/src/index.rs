use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::models::{Category, LibraryStats, Prompt, SearchOptions, SearchResult};
use crate::scan::scan_category;

const W_TITLE: u32 = 10;
const W_TAG: u32 = 8;
const W_ALIAS: u32 = 7;
const W_DESCRIPTION: u32 = 5;
const W_CONTENT: u32 = 2;

/// In-memory lookup table over every scanned category.
///
/// Each record is stored once and referenced by many case-folded keys: its
/// id, each alias, and its bare filename stem. The key list preserves
/// registration order, so the prefixed and fuzzy lookup passes always return
/// the first key registered during the fixed category build order.
#[derive(Debug, Default)]
pub struct PromptIndex {
    prompts: Vec<Arc<Prompt>>,
    by_id: HashMap<String, usize>,
    /// Registration-ordered `(key, prompt slot)` pairs; one entry per key.
    keys: Vec<(String, usize)>,
    by_key: HashMap<String, usize>,
}

impl PromptIndex {
    #[must_use]
    pub fn build(library_root: &Path) -> Self {
        log::debug!("building prompt index from {}", library_root.display());
        let mut index = Self::default();
        for category in Category::ALL {
            for prompt in scan_category(library_root, category) {
                index.insert(Arc::new(prompt));
            }
        }
        index
    }

    fn insert(&mut self, prompt: Arc<Prompt>) {
        let id_key = prompt.id.to_lowercase();
        let slot = if let Some(&existing) = self.by_id.get(&id_key) {
            // Duplicate ids (same stem under flattened nesting): last wins.
            self.prompts[existing] = Arc::clone(&prompt);
            existing
        } else {
            self.by_id.insert(id_key.clone(), self.prompts.len());
            self.prompts.push(Arc::clone(&prompt));
            self.prompts.len() - 1
        };

        self.register_key(id_key, slot);
        for alias in &prompt.aliases {
            self.register_key(alias.to_lowercase(), slot);
        }
        self.register_key(bare_stem(&prompt.id).to_lowercase(), slot);
    }

    fn register_key(&mut self, key: String, slot: usize) {
        if let Some(&pos) = self.by_key.get(&key) {
            // Key collision across records: later registration wins the slot.
            self.keys[pos].1 = slot;
        } else {
            self.by_key.insert(key.clone(), self.keys.len());
            self.keys.push((key, slot));
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Resolves a name, id, or alias: exact key first, then a
    /// category-prefixed pass, then a fuzzy substring pass over keys and
    /// titles. Absence is `None`, never an error.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Arc<Prompt>> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        if let Some(&pos) = self.by_key.get(&needle) {
            return self.prompts.get(self.keys[pos].1);
        }
        self.resolve_prefixed(&needle)
            .or_else(|| self.resolve_fuzzy(&needle))
    }

    fn resolve_prefixed(&self, needle: &str) -> Option<&Arc<Prompt>> {
        let suffix = format!("/{needle}");
        for category in Category::ALL {
            let scoped = format!("{category}/{needle}");
            for (key, slot) in &self.keys {
                if key.contains(&scoped) || key.ends_with(&suffix) {
                    return self.prompts.get(*slot);
                }
            }
        }
        None
    }

    fn resolve_fuzzy(&self, needle: &str) -> Option<&Arc<Prompt>> {
        for (key, slot) in &self.keys {
            let prompt = self.prompts.get(*slot)?;
            if key.contains(needle) || prompt.title.to_lowercase().contains(needle) {
                return Some(prompt);
            }
        }
        None
    }

    /// Scores every record once (records are stored once regardless of how
    /// many keys point at them) and returns matches in descending score
    /// order; ties keep encounter order.
    #[must_use]
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        for prompt in &self.prompts {
            if let Some(category) = options.category
                && prompt.category != category
            {
                continue;
            }
            let score = score_prompt(prompt, &needle);
            if score == 0 {
                continue;
            }
            results.push(SearchResult {
                prompt: Prompt::clone(prompt),
                score,
            });
        }

        results.sort_by(|a, b| b.score.cmp(&a.score));
        if let Some(limit) = options.limit {
            results.truncate(limit);
        }
        results
    }

    /// Distinct records sorted ascending by id.
    #[must_use]
    pub fn list(&self, category: Option<Category>) -> Vec<Arc<Prompt>> {
        let mut out: Vec<_> = self
            .prompts
            .iter()
            .filter(|prompt| category.is_none_or(|c| prompt.category == c))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Totals plus a per-category breakdown covering all eight categories,
    /// zero counts included.
    #[must_use]
    pub fn stats(&self) -> LibraryStats {
        let mut by_category: BTreeMap<String, usize> = Category::ALL
            .iter()
            .map(|category| (category.dir_name().to_string(), 0))
            .collect();
        for prompt in &self.prompts {
            *by_category
                .entry(prompt.category.dir_name().to_string())
                .or_default() += 1;
        }
        LibraryStats {
            total: self.prompts.len(),
            by_category,
        }
    }
}

fn score_prompt(prompt: &Prompt, needle: &str) -> u32 {
    let mut score = 0;
    if prompt.title.to_lowercase().contains(needle) {
        score += W_TITLE;
    }
    if prompt.description.to_lowercase().contains(needle) {
        score += W_DESCRIPTION;
    }
    if prompt.tags.iter().any(|tag| tag.to_lowercase().contains(needle)) {
        score += W_TAG;
    }
    if prompt
        .aliases
        .iter()
        .any(|alias| alias.to_lowercase().contains(needle))
    {
        score += W_ALIAS;
    }
    if prompt.content.to_lowercase().contains(needle) {
        score += W_CONTENT;
    }
    score
}

fn bare_stem(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}
