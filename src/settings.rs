use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::apt::AptCommands;
use crate::catalog::DEFAULT_SEED_METAPACKAGE;

const APP_SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Language code; `None` means detect from the environment.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_elevation")]
    pub elevation: String,
    #[serde(default = "default_package_manager")]
    pub package_manager: String,
    #[serde(default = "default_index_tool")]
    pub index_tool: String,
    #[serde(default = "default_status_tool")]
    pub status_tool: String,
    #[serde(default = "default_seed_metapackage")]
    pub seed_metapackage: String,
    #[serde(default = "default_confirm_pref")]
    pub confirm_install: bool,
    #[serde(default = "default_confirm_pref")]
    pub confirm_remove: bool,
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,
    #[serde(default = "default_max_operation_history")]
    pub max_operation_history: usize,
}

fn default_elevation() -> String {
    "sudo".to_string()
}

fn default_package_manager() -> String {
    "apt-get".to_string()
}

fn default_index_tool() -> String {
    "apt-cache".to_string()
}

fn default_status_tool() -> String {
    "dpkg".to_string()
}

fn default_seed_metapackage() -> String {
    DEFAULT_SEED_METAPACKAGE.to_string()
}

fn default_confirm_pref() -> bool {
    true
}

fn default_refresh_delay_ms() -> u64 {
    1000
}

fn default_max_operation_history() -> usize {
    50
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: None,
            elevation: default_elevation(),
            package_manager: default_package_manager(),
            index_tool: default_index_tool(),
            status_tool: default_status_tool(),
            seed_metapackage: default_seed_metapackage(),
            confirm_install: default_confirm_pref(),
            confirm_remove: default_confirm_pref(),
            refresh_delay_ms: default_refresh_delay_ms(),
            max_operation_history: default_max_operation_history(),
        }
    }
}

impl AppSettings {
    pub fn commands(&self) -> AptCommands {
        AptCommands::new(&self.elevation, &self.package_manager)
    }
}

pub fn load_app_settings() -> AppSettings {
    let Some(path) = app_settings_path() else {
        return AppSettings::default();
    };

    let Ok(content) = fs::read_to_string(&path) else {
        return AppSettings::default();
    };

    parse_app_settings(&content)
}

pub(crate) fn parse_app_settings(content: &str) -> AppSettings {
    match serde_json::from_str(content) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Ignoring unreadable settings: {}", err);
            AppSettings::default()
        }
    }
}

pub fn save_app_settings(settings: &AppSettings) -> Result<(), String> {
    let Some(path) = app_settings_path() else {
        return Err("Unable to determine settings directory".to_string());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("Failed to create settings directory: {}", err))?;
    }

    let data = serde_json::to_string_pretty(settings)
        .map_err(|err| format!("Failed to serialize settings: {}", err))?;

    fs::write(&path, data).map_err(|err| format!("Failed to write settings: {}", err))
}

fn app_config_dir() -> Option<PathBuf> {
    config_dir_from(|key| env::var(key).ok())
}

fn config_dir_from(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(custom) = lookup("HAPMGR_CONFIG_DIR") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    if let Some(config_home) = lookup("XDG_CONFIG_HOME") {
        let trimmed = config_home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join("hapmgr"));
        }
    }

    if let Some(home) = lookup("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join(".config").join("hapmgr"));
        }
    }

    None
}

pub fn app_settings_path() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join(APP_SETTINGS_FILE))
}
