//! Application configuration.
//!
//! Settings live in `config.json` inside the data directory (see
//! [`DataStorage`]). A missing file means defaults; a missing field inside an
//! existing file takes its default too, so older files keep loading when new
//! settings are added.
//!
//! ```rust,no_run
//! use taskbell::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut config = Config::read()?;
//! config.auto_cleanup = true;
//! config.save()?;
//! # Ok(())
//! # }
//! ```

use super::data_storage::DataStorage;
use super::expiry::EvictionPolicy;
use super::notifier::{NOTIFICATION_BODY, NOTIFICATION_ICON};
use super::scheduler::{ReminderSettings, DEFAULT_CLEANUP_DELAY_MS};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A group of settings offered by the configuration wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// What a rebuild does with tasks whose due time has passed.
    pub eviction: EvictionPolicy,

    /// Delete a task once its reminder notification is dismissed.
    pub auto_cleanup: bool,

    /// Wait between dismissal and the auto-cleanup delete.
    pub cleanup_delay_ms: u64,

    pub notification_body: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_icon: Option<String>,

    pub haptics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            eviction: EvictionPolicy::default(),
            auto_cleanup: false,
            cleanup_delay_ms: DEFAULT_CLEANUP_DELAY_MS,
            notification_body: NOTIFICATION_BODY.to_string(),
            notification_icon: Some(NOTIFICATION_ICON.to_string()),
            haptics: true,
        }
    }
}

impl Config {
    /// Loads the configuration, falling back to defaults when no file exists.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Settings handed to the scheduler.
    pub fn reminder_settings(&self) -> ReminderSettings {
        ReminderSettings {
            body: self.notification_body.clone(),
            icon: self.notification_icon.clone(),
            haptics: self.haptics,
            auto_cleanup: self.auto_cleanup,
            cleanup_delay_ms: self.cleanup_delay_ms,
        }
    }

    /// Interactive setup wizard, pre-filled with the current settings.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "reminders".to_string(),
                name: Message::ConfigModuleReminders.to_string(),
            },
            ConfigModule {
                key: "notifications".to_string(),
                name: Message::ConfigModuleNotifications.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "reminders" => {
                    msg_print!(Message::ConfigModuleReminders);
                    let policies = [EvictionPolicy::Delete, EvictionPolicy::Skip];
                    let current = policies.iter().position(|p| *p == config.eviction).unwrap_or(0);
                    let policy = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptEvictionPolicy.to_string())
                        .items(&["Delete them", "Hide them"])
                        .default(current)
                        .interact()?;
                    config.eviction = policies[policy];

                    config.auto_cleanup = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptAutoCleanup.to_string())
                        .default(config.auto_cleanup)
                        .interact()?;

                    if config.auto_cleanup {
                        config.cleanup_delay_ms = Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptCleanupDelay.to_string())
                            .default(config.cleanup_delay_ms)
                            .interact_text()?;
                    }
                }
                "notifications" => {
                    msg_print!(Message::ConfigModuleNotifications);
                    config.notification_body = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptNotificationBody.to_string())
                        .default(config.notification_body.clone())
                        .interact_text()?;

                    let icon: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptNotificationIcon.to_string())
                        .default(config.notification_icon.clone().unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    config.notification_icon = Some(icon.trim().to_string()).filter(|icon| !icon.is_empty());

                    config.haptics = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptHaptics.to_string())
                        .default(config.haptics)
                        .interact()?;
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
