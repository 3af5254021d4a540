use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::EngineSettings;

const SETTINGS_FILE: &str = "settings.toml";

/// Loads and saves engine settings from a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file in the platform config directory.
    pub fn with_default_path() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "RosterGrid", "RosterGrid")
            .context("Failed to resolve the configuration directory")?;
        Ok(dirs.config_dir().join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load(&self) -> Result<EngineSettings> {
        if !self.path.exists() {
            log::info!(
                "No settings file at {:?}, using defaults",
                self.path
            );
            return Ok(EngineSettings::default());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {:?}", self.path))?;
        Self::parse(&raw).with_context(|| format!("Invalid settings file {:?}", self.path))
    }

    /// Parse and validate settings from TOML text
    pub fn parse(raw: &str) -> Result<EngineSettings> {
        let settings: EngineSettings =
            toml::from_str(raw).context("Failed to parse settings TOML")?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;
        Ok(settings.normalized())
    }

    /// Write settings, creating the parent directory if needed.
    pub fn save(&self, settings: &EngineSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create settings directory: {:?}", parent)
                })?;
            }
        }

        let raw = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;

        log::info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event_ref::EventType;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("absent.toml"));

        let settings = service.load().unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_parse_partial_file_keeps_other_defaults() {
        let settings = SettingsService::parse(
            r#"
            privileged_roles = ["Roostermakers", "  Senioren Administratie "]
            default_event_type = "sickness"
            "#,
        )
        .unwrap();

        assert_eq!(
            settings.privileged_roles,
            vec!["roostermakers", "senioren administratie"]
        );
        assert_eq!(settings.default_event_type, EventType::Sickness);
        assert_eq!(settings.menu_margin, EngineSettings::default().menu_margin);
    }

    #[test]
    fn test_parse_rejects_negative_margin() {
        let err = SettingsService::parse("menu_margin = -4.0").unwrap_err();
        assert!(format!("{:#}", err).contains("Menu margin"));
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "privileged_roles = 3").unwrap();

        let err = SettingsService::new(&path).load().unwrap_err();
        assert!(format!("{:#}", err).contains("settings.toml"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join("settings.toml"));
        let settings = EngineSettings {
            privileged_roles: vec!["planning".into()],
            menu_margin: 12.0,
            clear_selection_after_action: false,
            default_event_type: EventType::Compensation,
        };

        service.save(&settings).unwrap();
        assert_eq!(service.load().unwrap(), settings);
    }
}
