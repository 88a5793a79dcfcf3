use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Colors for rows whose cost crosses the expensive threshold.
    pub fn expensive_style(self) -> ExpensiveStyle {
        match self {
            ThemeMode::Dark => ExpensiveStyle {
                background: Color::Rgb(0x4b, 0x2e, 0x83),
                name: Color::Rgb(0xff, 0x6b, 0x6b),
            },
            ThemeMode::Light => ExpensiveStyle {
                background: Color::Rgb(0xff, 0xf9, 0xe6),
                name: Color::Rgb(0xd5, 0x85, 0x00),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpensiveStyle {
    pub background: Color,
    pub name: Color,
}

/// On-disk shape of the client-local state file.
#[derive(Debug, Default, Deserialize, Serialize)]
struct PersistedState {
    #[serde(default)]
    theme: Option<ThemeMode>,
}

/// Where the theme preference lives. `None` keeps it in memory only.
#[derive(Debug, Clone, Default)]
pub struct ThemeStore {
    path: Option<PathBuf>,
}

impl ThemeStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        Self { path: None }
    }

    /// Persisted mode, or `None` when absent or unreadable.
    pub fn read(&self) -> Option<ThemeMode> {
        let path = self.path.as_ref()?;
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str::<PersistedState>(&content) {
            Ok(state) => state.theme,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed theme state");
                None
            }
        }
    }

    pub fn write(&self, mode: ThemeMode) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let body = toml::to_string(&PersistedState { theme: Some(mode) })?;
        std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// Light/dark preference backed by a [`ThemeStore`].
#[derive(Debug)]
pub struct ThemeController {
    mode: ThemeMode,
    store: ThemeStore,
}

impl ThemeController {
    pub fn init(store: ThemeStore) -> Self {
        let mode = store.read().unwrap_or_default();
        tracing::info!(theme = mode.label(), "theme initialised");
        Self { mode, store }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip the mode once and persist it. A failed write is logged; the new
    /// mode still applies for this session.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.flipped();
        if let Err(e) = self.store.write(self.mode) {
            tracing::error!(error = %e, "failed to persist theme");
        }
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_light_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let controller = ThemeController::init(ThemeStore::at(dir.path().join("state.toml")));
        assert_eq!(controller.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_malformed_state_falls_back_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        std::fs::write(&path, "theme = \"purple\"\n").unwrap();
        assert_eq!(ThemeController::init(ThemeStore::at(&path)).mode(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.toml");
        let mut controller = ThemeController::init(ThemeStore::at(&path));

        assert_eq!(controller.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeStore::at(&path).read(), Some(ThemeMode::Dark));

        let reloaded = ThemeController::init(ThemeStore::at(&path));
        assert_eq!(reloaded.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_toggle_twice_restores_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        ThemeStore::at(&path).write(ThemeMode::Dark).unwrap();

        let mut controller = ThemeController::init(ThemeStore::at(&path));
        let before = controller.mode().expensive_style();
        controller.toggle();
        controller.toggle();

        assert_eq!(controller.mode(), ThemeMode::Dark);
        assert_eq!(ThemeStore::at(&path).read(), Some(ThemeMode::Dark));
        assert_eq!(controller.mode().expensive_style(), before);
    }

    #[test]
    fn test_in_memory_store_never_touches_disk() {
        let mut controller = ThemeController::init(ThemeStore::in_memory());
        assert_eq!(controller.toggle(), ThemeMode::Dark);
        assert!(controller.store.path.is_none());
    }
}
