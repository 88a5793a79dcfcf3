use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Persistent user settings loaded from ~/.config/tarefas-board.toml
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Backend base URL
    pub api_url: Option<String>,

    /// Where tracing output goes
    pub log_file: Option<PathBuf>,

    /// Where the theme preference is persisted
    pub state_file: Option<PathBuf>,
}

impl Settings {
    /// Load from the default config path. Returns Default if missing or malformed.
    pub fn load() -> Self {
        if let Some(path) = config_path() {
            Self::load_from(&path)
        } else {
            Self::default()
        }
    }

    fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match toml::from_str::<Settings>(&content) {
            Ok(s) => s,
            Err(e) => {
                eprintln!(
                    "Warning: failed to parse {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Returns ~/.config/tarefas-board.toml (XDG-style).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tarefas-board.toml"))
}

fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tarefas-board"))
}

/// Default theme state file: <data_local_dir>/tarefas-board/state.toml
pub fn default_state_file() -> Option<PathBuf> {
    data_dir().map(|d| d.join("state.toml"))
}

/// Default log file: <data_local_dir>/tarefas-board/tarefas-board.log
pub fn default_log_file() -> PathBuf {
    data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tarefas-board.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nonexistent.toml"));
        assert!(settings.api_url.is_none());
        assert!(settings.log_file.is_none());
        assert!(settings.state_file.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tarefas-board.toml");
        fs::write(
            &path,
            r#"
api_url = "http://tarefas.local:8080"
log_file = "/tmp/tarefas.log"
state_file = "/tmp/tarefas-state.toml"
"#,
        )
        .unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.api_url.as_deref(), Some("http://tarefas.local:8080"));
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/tarefas.log")));
        assert_eq!(settings.state_file, Some(PathBuf::from("/tmp/tarefas-state.toml")));
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "api_url = \"http://localhost:5000\"\n").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.api_url.as_deref(), Some("http://localhost:5000"));
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_load_malformed_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "api_url = [1, 2").unwrap();
        let settings = Settings::load_from(&path);
        assert!(settings.api_url.is_none());
    }

    #[test]
    fn test_default_log_file_name() {
        assert!(default_log_file().ends_with("tarefas-board.log"));
    }
}
