use blink_connect_setup::camera::blink_directory::BlinkDirectory;
use blink_connect_setup::cli;
use blink_connect_setup::common::logging_setup;
use blink_connect_setup::config_loader::{self, MasterConfig};
use blink_connect_setup::core::console::StdConsole;
use blink_connect_setup::operations::setup_session::{SessionOutcome, SetupSession};
use log::{info, error, debug};
use anyhow::{Context, Result};
use std::process::ExitCode;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let master_config = match matches.get_one::<String>("config") {
        Some(config_path) => match config_loader::load_config(config_path) {
            Ok(cfg) => {
                logging_setup::initialize_logging(Some(&cfg), &matches);
                cfg
            }
            Err(e) => {
                logging_setup::initialize_logging(None, &matches);
                error!("❌ Failed to load configuration from '{}': {:#}. Exiting.", config_path, e);
                return Err(e.context(format!("Failed to load configuration from '{}'", config_path)));
            }
        },
        None => {
            let cfg = MasterConfig::default();
            logging_setup::initialize_logging(Some(&cfg), &matches);
            cfg
        }
    };
    debug!("Effective configuration: {:?}", master_config);

    // Positional argument first, then the tool config.
    let default_settings_path = matches
        .get_one::<String>("settings")
        .cloned()
        .unwrap_or_else(|| master_config.app_settings.default_settings_path.clone());

    let directory = BlinkDirectory::new(&master_config.blink)
        .context("Failed to create the Blink HTTP client")?;

    // The session owns the HTTP client; it is dropped at the end of this
    // block on every path, before the exit code is produced.
    let result = {
        let mut session = SetupSession::new(
            StdConsole::new(),
            directory,
            master_config.app_settings.obfuscate_credentials,
        );
        let result = session.run(Some(default_settings_path.as_str())).await;
        result
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("❌ Setup aborted: {}", e);
            println!();
            println!("Setup aborted: {}", e);
            SessionOutcome::Aborted { reason: e.to_string() }
        }
    };

    info!("🏁 Setup finished with {:?} in {:?}.", outcome, main_start_time.elapsed());
    Ok(ExitCode::from(outcome.exit_code()))
}
