use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn log_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("dotchase")
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "dotchase") {
            proj_dirs.data_local_dir().join("logs")
        } else {
            std::env::temp_dir().join("dotchase")
        }
    }
}
