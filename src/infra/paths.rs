// src/infra/paths.rs — Config and data locations
//
// KAIZEN_HOME overrides everything: config lives in $KAIZEN_HOME and data in
// $KAIZEN_HOME/data. Otherwise config uses ~/.kaizen/ and data uses the
// platform data dir (XDG_DATA_HOME/kaizen on Linux).

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

fn kaizen_home() -> Option<PathBuf> {
    std::env::var_os("KAIZEN_HOME").map(PathBuf::from)
}

/// Configuration directory: $KAIZEN_HOME/ or ~/.kaizen/
pub fn config_dir() -> PathBuf {
    if let Some(home) = kaizen_home() {
        return home;
    }
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(".kaizen"),
        None => PathBuf::from(".kaizen"),
    }
}

/// Data directory: $KAIZEN_HOME/data/ or the platform-local data dir.
pub fn data_dir() -> PathBuf {
    if let Some(home) = kaizen_home() {
        return home.join("data");
    }
    match ProjectDirs::from("", "", "kaizen") {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => config_dir().join("data"),
    }
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn db_path() -> PathBuf {
    data_dir().join("kaizen.db")
}

/// Create the data directory if it does not exist yet.
pub fn ensure_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir())
}
