use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::index::PromptIndex;
use crate::models::{Category, LibraryStats, Prompt, SearchOptions, SearchResult};
use crate::root;

const COMPOSE_SEPARATOR: &str = "\n\n---\n\n";

/// Read-only view over one prompt library root.
///
/// The index is built lazily on first use and memoized for the lifetime of
/// this value; [`PromptLibrary::reset_cache`] forces the next operation to
/// rescan the filesystem. Each library owns its own cache, so independent
/// instances (one per test, say) never leak state into each other.
pub struct PromptLibrary {
    root: PathBuf,
    index: RwLock<Option<Arc<PromptIndex>>>,
}

impl fmt::Debug for PromptLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptLibrary")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl PromptLibrary {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index: RwLock::new(None),
        }
    }

    /// Opens the library at the configured or discovered root
    /// (`PROMPTDEX_ROOT`, else the dev/installed layout probe).
    #[must_use]
    pub fn discover() -> Self {
        Self::new(root::resolve_root())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the memoized index, building it under the write lock on first
    /// access. The double check after acquiring the write lock serializes
    /// racing first callers onto a single build.
    fn index(&self) -> Arc<PromptIndex> {
        {
            let slot = self.index.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(index) = slot.as_ref() {
                return Arc::clone(index);
            }
        }

        let mut slot = self.index.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = slot.as_ref() {
            return Arc::clone(index);
        }
        let built = Arc::new(PromptIndex::build(&self.root));
        *slot = Some(Arc::clone(&built));
        built
    }

    /// Drops the memoized index; the next operation rebuilds from disk.
    pub fn reset_cache(&self) {
        let mut slot = self.index.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<Prompt>> {
        self.index().resolve(name).cloned()
    }

    #[must_use]
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        self.index().search(query, options)
    }

    #[must_use]
    pub fn list(&self, category: Option<Category>) -> Vec<Arc<Prompt>> {
        self.index().list(category)
    }

    #[must_use]
    pub fn stats(&self) -> LibraryStats {
        self.index().stats()
    }

    /// Body of one resolved record, or `None` when the name resolves to
    /// nothing.
    #[must_use]
    pub fn content(&self, name: &str) -> Option<String> {
        self.resolve(name).map(|prompt| prompt.content.clone())
    }

    /// Joins the resolved records' titled bodies with a horizontal rule.
    /// Names that resolve to nothing contribute nothing, so an input of
    /// only-unknown names composes to the empty string.
    #[must_use]
    pub fn compose<I, S>(&self, names: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let index = self.index();
        let blocks: Vec<String> = names
            .into_iter()
            .filter_map(|name| index.resolve(name.as_ref()))
            .map(|prompt| format!("## {}\n\n{}", prompt.title, prompt.content))
            .collect();
        blocks.join(COMPOSE_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent dir")).expect("create dirs");
        fs::write(path, contents).expect("write fixture");
    }

    #[test]
    fn compose_skips_unresolved_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "prompts/planning/prd-generator.md",
            "---\ntitle: PRD Generator\n---\nGenerate a PRD.\n",
        );
        let library = PromptLibrary::new(dir.path());

        let composed = library.compose(["prd-generator", "doesNotExist123"]);
        assert!(composed.contains("## PRD Generator"));
        assert!(composed.contains("Generate a PRD."));
        assert!(!composed.contains("doesNotExist123"));
        assert!(!composed.contains(COMPOSE_SEPARATOR));
    }

    #[test]
    fn compose_of_only_unknown_names_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let library = PromptLibrary::new(dir.path());
        assert_eq!(library.compose(["bogus1", "bogus2"]), "");
    }

    #[test]
    fn compose_joins_blocks_with_a_rule() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "prompts/a.md", "---\ntitle: A\n---\nAlpha.\n");
        write(dir.path(), "prompts/b.md", "---\ntitle: B\n---\nBeta.\n");
        let library = PromptLibrary::new(dir.path());

        let composed = library.compose(["a", "b"]);
        assert_eq!(composed, "## A\n\nAlpha.\n\n---\n\n## B\n\nBeta.");
    }

    #[test]
    fn cache_memoizes_until_reset() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "prompts/first.md", "First body.\n");
        let library = PromptLibrary::new(dir.path());
        assert_eq!(library.stats().total, 1);

        write(dir.path(), "prompts/second.md", "Second body.\n");
        assert_eq!(library.stats().total, 1, "memoized view must not see new files");

        library.reset_cache();
        assert_eq!(library.stats().total, 2);
    }

    #[test]
    fn content_returns_body_or_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "snippets/hello.md", "---\ntitle: Hello\n---\nHi there.\n");
        let library = PromptLibrary::new(dir.path());

        assert_eq!(library.content("hello").as_deref(), Some("Hi there."));
        assert!(library.content("missing-name").is_none());
    }

    #[test]
    fn concurrent_first_access_builds_one_coherent_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        for i in 0..8 {
            write(dir.path(), &format!("prompts/doc-{i}.md"), "Body.\n");
        }
        let library = std::sync::Arc::new(PromptLibrary::new(dir.path()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let library = std::sync::Arc::clone(&library);
                std::thread::spawn(move || library.stats().total)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("join"), 8);
        }
    }
}
