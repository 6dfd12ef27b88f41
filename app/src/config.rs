use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::mount::CONTAINER_ID;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub editor: EditorOptions,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vidixy".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Regions of the window the editor may mount on.
    pub mount_points: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mount_points: vec![CONTAINER_ID.to_string()],
        }
    }
}

/// Editor setup read from the `[editor]` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EditorOptions {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Also offer the built-in Number and Add nodes.
    pub builtin_nodes: bool,
    /// Directory of `*.toml` node definitions to register.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_dir: Option<PathBuf>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            min_zoom: 0.2,
            max_zoom: 3.0,
            builtin_nodes: false,
            nodes_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn get_config_path() -> Option<PathBuf> {
    use directories::ProjectDirs;
    use std::fs;

    let proj_dirs = ProjectDirs::from("me", "vidixy", "vidixy")?;
    let config_dir = proj_dirs.config_dir();
    if !config_dir.exists() {
        if let Err(e) = fs::create_dir_all(config_dir) {
            error!("Failed to create config directory: {}", e);
            return None;
        }
    }
    Some(config_dir.join("config.toml"))
}

#[cfg(target_arch = "wasm32")]
fn get_config_path() -> Option<PathBuf> {
    None
}

pub fn save_config(config: &AppConfig) {
    let Some(path) = get_config_path() else {
        return;
    };
    match toml::to_string_pretty(config) {
        Ok(toml_str) => {
            if let Err(e) = std::fs::write(&path, toml_str) {
                error!("Failed to write config file: {}", e);
            } else {
                info!("Config saved to {}", path.display());
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Load the config, writing the defaults on first launch.
pub fn load_config() -> AppConfig {
    let Some(path) = get_config_path() else {
        return AppConfig::default();
    };
    if !path.exists() {
        let config = AppConfig::default();
        save_config(&config);
        return config;
    }
    match std::fs::read_to_string(&path) {
        Ok(toml_str) => match AppConfig::from_toml_str(&toml_str) {
            Ok(config) => return config,
            Err(e) => {
                warn!("Failed to parse config file, using defaults: {}", e);
            }
        },
        Err(e) => {
            warn!("Failed to read config file, using defaults: {}", e);
        }
    }
    AppConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [editor]
            builtin_nodes = true
            "#,
        )
        .unwrap();
        assert!(config.editor.builtin_nodes);
        assert_eq!(config.editor.max_zoom, 3.0);
        assert_eq!(config.layout.mount_points, vec!["container".to_string()]);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn layout_can_drop_the_container() {
        let config = AppConfig::from_toml_str("[layout]\nmount_points = []\n").unwrap();
        assert!(config.layout.mount_points.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AppConfig::from_toml_str("[editor\nmin_zoom = ").is_err());
    }
}
