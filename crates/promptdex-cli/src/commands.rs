use std::path::Path;

use anyhow::{Result, bail};
use promptdex_core::{Category, Prompt, PromptLibrary, SearchOptions};
use serde::Serialize;

use crate::cli::Commands;

pub(crate) fn run(root: Option<&Path>, command: Commands) -> Result<()> {
    let library = match root {
        Some(root) => PromptLibrary::new(root),
        None => PromptLibrary::discover(),
    };
    run_with_library(&library, command)
}

fn run_with_library(library: &PromptLibrary, command: Commands) -> Result<()> {
    match command {
        Commands::Show(args) => {
            let Some(prompt) = library.resolve(&args.name) else {
                bail!("prompt not found: {}", args.name);
            };
            print_json(&*prompt)?;
        }
        Commands::Read(args) => {
            let Some(content) = library.content(&args.name) else {
                bail!("prompt not found: {}", args.name);
            };
            println!("{content}");
        }
        Commands::Search(args) => {
            let options = SearchOptions {
                category: args.category.as_deref().map(parse_category).transpose()?,
                limit: args.limit,
            };
            let results = library.search(&args.query, &options);
            print_json(&results)?;
        }
        Commands::Ls(args) => {
            let category = args.category.as_deref().map(parse_category).transpose()?;
            let prompts = library.list(category);
            let records: Vec<&Prompt> = prompts.iter().map(AsRef::as_ref).collect();
            print_json(&records)?;
        }
        Commands::Stats => {
            print_json(&library.stats())?;
        }
        Commands::Compose(args) => {
            println!("{}", library.compose(&args.names));
        }
    }
    Ok(())
}

fn parse_category(raw: &str) -> Result<Category> {
    match Category::parse(raw) {
        Some(category) => Ok(category),
        None => bail!("unknown category: {raw}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::cli::{ComposeArgs, ListArgs, NameArg, SearchArgs};

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent dir")).expect("create dirs");
        fs::write(path, contents).expect("write fixture");
    }

    fn fixture_library(dir: &Path) -> PromptLibrary {
        write(
            dir,
            "skills/engineering/code-review.md",
            "---\ntitle: Code Review\ntags:\n  - code\n---\nReview code carefully.\n",
        );
        PromptLibrary::new(dir)
    }

    #[test]
    fn show_and_read_succeed_for_known_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let library = fixture_library(dir.path());

        let show = run_with_library(
            &library,
            Commands::Show(NameArg {
                name: "code-review".to_string(),
            }),
        );
        assert!(show.is_ok());

        let read = run_with_library(
            &library,
            Commands::Read(NameArg {
                name: "Code-Review".to_string(),
            }),
        );
        assert!(read.is_ok());
    }

    #[test]
    fn show_fails_with_a_plain_message_for_unknown_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let library = fixture_library(dir.path());

        let err = run_with_library(
            &library,
            Commands::Show(NameArg {
                name: "missing-prompt".to_string(),
            }),
        )
        .expect_err("must fail");
        assert!(err.to_string().contains("missing-prompt"));
    }

    #[test]
    fn search_rejects_unknown_categories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let library = fixture_library(dir.path());

        let err = run_with_library(
            &library,
            Commands::Search(SearchArgs {
                query: "code".to_string(),
                category: Some("nonsense".to_string()),
                limit: None,
            }),
        )
        .expect_err("must fail");
        assert!(err.to_string().contains("unknown category"));
    }

    #[test]
    fn ls_stats_and_compose_run_against_the_fixture() {
        let dir = tempfile::tempdir().expect("tempdir");
        let library = fixture_library(dir.path());

        assert!(
            run_with_library(
                &library,
                Commands::Ls(ListArgs {
                    category: Some("skills".to_string()),
                })
            )
            .is_ok()
        );
        assert!(run_with_library(&library, Commands::Stats).is_ok());
        assert!(
            run_with_library(
                &library,
                Commands::Compose(ComposeArgs {
                    names: vec!["code-review".to_string(), "missing".to_string()],
                })
            )
            .is_ok()
        );
    }
}
