use serde::Deserialize;
use std::fs;
use crate::app_config::ApplicationConfig;
use crate::blink_config::BlinkApiConfig;
use anyhow::{Result, Context, bail};
use log::{debug, info};
use std::time::Instant;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct MasterConfig {
    #[serde(rename = "application", default)]
    pub app_settings: ApplicationConfig,
    #[serde(default)]
    pub blink: BlinkApiConfig,
}

pub fn load_config(path: &str) -> Result<MasterConfig> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file '{}'. 📖", path))?;
    debug!("Read config file in {:?}", start_time.elapsed());

    let config = parse_config(&config_str)
        .with_context(|| format!("Invalid configuration in '{}'. 💔", path))?;

    info!("✅ Successfully loaded and validated configuration from '{}' in {:?}", path, start_time.elapsed());
    Ok(config)
}

pub fn parse_config(config_str: &str) -> Result<MasterConfig> {
    let parse_start_time = Instant::now();
    // An empty document is a valid "all defaults" config.
    let config: MasterConfig = if config_str.trim().is_empty() {
        MasterConfig::default()
    } else {
        serde_yaml::from_str(config_str).context("Failed to parse YAML configuration")?
    };
    debug!("Parsed YAML in {:?}", parse_start_time.elapsed());

    validate_master_config(&config).context("Master configuration validation failed 👎")?;
    Ok(config)
}

fn validate_master_config(config: &MasterConfig) -> Result<()> {
    debug!("🕵️ Validating master configuration...");
    let validation_start_time = Instant::now();
    if config.app_settings.default_settings_path.trim().is_empty() {
        bail!("❌ Application default_settings_path cannot be empty.");
    }
    if config.blink.client_name.trim().is_empty() {
        bail!("❌ Blink client_name cannot be empty.");
    }
    if let Some(url) = &config.blink.api_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!("❌ Blink api_url '{}' must start with http:// or https://.", url);
        }
    }
    if config.blink.request_timeout_secs == 0 {
        bail!("❌ Blink request_timeout_secs must be greater than zero.");
    }
    debug!("👍 Master configuration validated successfully in {:?}.", validation_start_time.elapsed());
    Ok(())
}
