use std::path::{Path, PathBuf};
use venue_core::paths::VENUE_DIR;

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `VENUE_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `start` looking for `.venue/`
/// 3. Fall back to `start`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_root_from(&cwd)
}

fn find_root_from(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(VENUE_DIR).is_dir())
        .unwrap_or(start)
        .to_path_buf()
}
