//! Search path assembly.
//!
//! The search path is configuration owned by the host, not the resolver.
//! Order: current working directory, then explicit `--path` flags, then the
//! `LODE_PATH` environment variable (colon-separated). Earlier entries win
//! name collisions, so the working directory always shadows installed
//! locations.

use std::path::PathBuf;

use lode_resolve::SearchPath;

/// Environment variable holding extra search roots, colon-separated.
pub const PATH_ENV: &str = "LODE_PATH";

/// Build a search path from explicit pieces. Pure — used by tests and by
/// [`assemble_search_path`].
pub fn search_path_from(
    cwd: Option<PathBuf>,
    extra: &[PathBuf],
    env_value: Option<&str>,
) -> SearchPath {
    let mut path = SearchPath::new();
    if let Some(cwd) = cwd {
        path.push_root(cwd);
    }
    for root in extra {
        path.push_root(root.clone());
    }
    if let Some(env_value) = env_value {
        for part in env_value.split(':').filter(|part| !part.is_empty()) {
            path.push_root(PathBuf::from(part));
        }
    }
    path
}

/// Build the process search path from the real environment.
pub fn assemble_search_path(extra: &[PathBuf]) -> SearchPath {
    let cwd = std::env::current_dir().ok();
    let env_value = std::env::var(PATH_ENV).ok();
    search_path_from(cwd, extra, env_value.as_deref())
}
