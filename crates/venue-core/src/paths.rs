use std::path::{Path, PathBuf};

pub const VENUE_DIR: &str = ".venue";
pub const CONFIG_FILE: &str = ".venue/config.yaml";

pub fn venue_dir(root: &Path) -> PathBuf {
    root.join(VENUE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
