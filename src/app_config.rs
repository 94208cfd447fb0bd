use serde::Deserialize;

pub const DEFAULT_SETTINGS_PATH: &str = "~/prusa-connect-upload.config";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApplicationConfig {
    pub default_settings_path: String, // "~" is expanded against the user's home
    pub log_level: Option<String>, // CLI --debug wins over this
    pub obfuscate_credentials: bool, // false stores the raw credential object
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            default_settings_path: DEFAULT_SETTINGS_PATH.to_string(),
            log_level: Some("warn".to_string()),
            obfuscate_credentials: true,
        }
    }
}
