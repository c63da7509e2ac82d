pub mod models;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ConfigItem, FileLoggingConfigItem, PromptSuffixConfigItem, TokenConfigItem,
};
use crate::errors::{Error, Result};
use crate::extensions::enums::parse_variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ConfigKey {
    ParentShortcut,
    ExitCommand,
    PromptSuffix,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "TokenConfigItem::parent_shortcut")]
    pub parent_shortcut: TokenConfigItem,
    #[serde(default = "TokenConfigItem::exit_command")]
    pub exit_command: TokenConfigItem,
    #[serde(default)]
    pub prompt_suffix: PromptSuffixConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            parent_shortcut: TokenConfigItem::parent_shortcut(),
            exit_command: TokenConfigItem::exit_command(),
            prompt_suffix: PromptSuffixConfigItem::default(),
            file_logging_enabled: FileLoggingConfigItem::default(),
        }
    }
}

/// Session settings backed by a JSON file.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self { path, data })
    }

    /// Like [`load_from`](Self::load_from), but a missing file yields the
    /// defaults. Nothing is written until a value is changed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from(path);
        }
        Ok(Self {
            path: path.to_path_buf(),
            data: ConfigFile::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parent_shortcut(&self) -> &str {
        self.data.parent_shortcut.get_value().as_str()
    }
    pub fn exit_command(&self) -> &str {
        self.data.exit_command.get_value().as_str()
    }
    pub fn prompt_suffix(&self) -> &str {
        self.data.prompt_suffix.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    /// `(key, description, value)` for every setting, in key order.
    pub fn rows(&self) -> Vec<(String, String, String)> {
        ConfigKey::iter()
            .map(|key| {
                let (description, value) = match key {
                    ConfigKey::ParentShortcut => (
                        self.data.parent_shortcut.description(),
                        self.parent_shortcut().to_string(),
                    ),
                    ConfigKey::ExitCommand => (
                        self.data.exit_command.description(),
                        self.exit_command().to_string(),
                    ),
                    ConfigKey::PromptSuffix => (
                        self.data.prompt_suffix.description(),
                        format!("{:?}", self.prompt_suffix()),
                    ),
                    ConfigKey::FileLoggingEnabled => (
                        self.data.file_logging_enabled.description(),
                        self.data.file_logging_enabled.get_value().to_string(),
                    ),
                };
                (key.to_string(), description.to_string(), value)
            })
            .collect()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = parse_variant::<ConfigKey>(key_str).map_err(|valid| {
            Error::Config(format!(
                "Unknown configuration key '{key_str}'. Valid keys: {valid}"
            ))
        })?;
        self.set_key(key, new_value)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        self.edit(|cfg| match key {
            ConfigKey::ParentShortcut => cfg.parent_shortcut.set_value(new_value),
            ConfigKey::ExitCommand => cfg.exit_command.set_value(new_value),
            ConfigKey::PromptSuffix => cfg.prompt_suffix.set_value(new_value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(new_value),
        })
    }

    /// Applies `f` to a copy and only keeps (and saves) it when `f` succeeds.
    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut draft = self.data.clone();
        f(&mut draft)?;
        self.data = draft;
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::Config(format!("Failed to encode config: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}
