use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "wpm-challenge";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        match Self::project() {
            Some(pd) => pd.config_dir().join("config.json"),
            None => PathBuf::from("wpm_challenge_config.json"),
        }
    }

    /// Log file under $HOME/.local/state, falling back to the platform data dir.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join(format!("{APP_NAME}.log")))
        } else {
            Self::project().map(|pd| pd.data_local_dir().join(format!("{APP_NAME}.log")))
        }
    }
}
