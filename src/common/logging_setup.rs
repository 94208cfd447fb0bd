use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;
use crate::common::timestamp_utils;
use crate::config_loader::MasterConfig;

const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

pub fn resolve_level_filter(config: Option<&MasterConfig>, debug_flag: bool) -> LevelFilter {
    // Determine log level from CLI, then config, then default
    let log_level_str = if debug_flag {
        "debug".to_string()
    } else {
        config
            .and_then(|c| c.app_settings.log_level.clone())
            .unwrap_or_else(|| "warn".to_string())
    };

    match log_level_str.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        s => {
            eprintln!("Unrecognized log level '{}', defaulting to warn.", s);
            LevelFilter::Warn
        }
    }
}

pub fn initialize_logging(config: Option<&MasterConfig>, cli_matches: &clap::ArgMatches) {
    let mut builder = Builder::new();
    builder.filter_level(resolve_level_filter(config, cli_matches.get_flag("debug")));

    // Diagnostics go to stderr; operator prompts own stdout.
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] - {}",
            timestamp_utils::current_local_timestamp_str(LOG_TIMESTAMP_FORMAT),
            record.level(),
            record.args()
        )
    });

    builder.try_init().unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", e);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_wins_over_config() {
        let mut config = MasterConfig::default();
        config.app_settings.log_level = Some("error".to_string());
        assert_eq!(resolve_level_filter(Some(&config), true), LevelFilter::Debug);
        assert_eq!(resolve_level_filter(Some(&config), false), LevelFilter::Error);
    }

    #[test]
    fn falls_back_to_warn() {
        assert_eq!(resolve_level_filter(None, false), LevelFilter::Warn);
        let mut config = MasterConfig::default();
        config.app_settings.log_level = Some("chatty".to_string());
        assert_eq!(resolve_level_filter(Some(&config), false), LevelFilter::Warn);
    }
}
