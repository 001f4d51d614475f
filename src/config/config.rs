use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_download_timeout")]
    pub download_timeout: u64,
    #[serde(default)]
    pub verify_checksums: bool,
}

fn default_download_timeout() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_timeout: default_download_timeout(),
            verify_checksums: false,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("com", "varbench", "varbench-tools") {
            let config_dir = proj_dirs.config_dir();
            let config_path = config_dir.join("config.toml");

            if config_path.exists() {
                if let Ok(content) = fs::read_to_string(config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Config::default()
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "varbench", "varbench-tools") {
            let config_dir = proj_dirs.config_dir();
            fs::create_dir_all(config_dir)?;

            let config_path = config_dir.join("config.toml");
            let content = toml::to_string_pretty(self)?;
            fs::write(config_path, content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.download_timeout, 300);
        assert!(!config.verify_checksums);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config: Config =
            toml::from_str("download_timeout = 60\nverify_checksums = true\n").unwrap();
        assert_eq!(config.download_timeout, 60);
        assert!(config.verify_checksums);
    }
}
