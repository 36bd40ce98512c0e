use std::env;
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "PROMPTDEX_ROOT";

/// Directory whose presence marks a candidate as the library root.
const PROBE_DIR: &str = "prompts";

/// Locates the library root: the `PROMPTDEX_ROOT` override wins, otherwise
/// the layout probe runs relative to the running executable.
#[must_use]
pub fn resolve_root() -> PathBuf {
    if let Some(root) = root_from_env() {
        return root;
    }
    let base = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    resolve_root_from(&base)
}

fn root_from_env() -> Option<PathBuf> {
    env::var(ROOT_ENV)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Distinguishes the development layout (root one level above `base`) from
/// an installed layout (two levels above) by probing the nearer candidate
/// for a `prompts` directory first. Neither matching falls back to the
/// development candidate, which simply scans as an empty library.
#[must_use]
pub fn resolve_root_from(base: &Path) -> PathBuf {
    let development = parent_or_self(base);
    let installed = parent_or_self(&development);
    for candidate in [&development, &installed] {
        if candidate.join(PROBE_DIR).is_dir() {
            return candidate.clone();
        }
    }
    development
}

fn parent_or_self(path: &Path) -> PathBuf {
    path.parent()
        .map_or_else(|| path.to_path_buf(), Path::to_path_buf)
}
