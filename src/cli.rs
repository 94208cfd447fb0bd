use clap::{Arg, Command, ArgAction};
use log::debug;
use std::time::Instant;

pub fn build_cli() -> Command {
    debug!("⚙️ Building CLI interface...");
    let start_time = Instant::now();
    let cmd = Command::new("blink-connect-setup")
        .version("0.1.0")
        .author("blink-connect-setup developers")
        .about("Links Blink cameras to Prusa Connect upload tokens and saves them to a settings file.")
        .arg(
            Arg::new("settings")
                .value_name("SETTINGS_PATH")
                .help("Default location offered for the settings file")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom tool configuration file (YAML)")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
        );
    debug!("✅ CLI interface built in {:?}", start_time.elapsed());
    cmd
}
