//! Interactive setup: pick the settings file, authenticate, confirm the
//! discovered cameras, edit the upload list and save or discard it.

use crate::camera::device_directory::{DeviceCandidate, DeviceDirectory};
use crate::core::console::{self, Console};
use crate::errors::AppError;
use crate::settings::codec;
use crate::settings::document::{Credential, SettingsDocument};
use crate::settings::store::{self, SettingsStore};
use log::{debug, error, info, warn};
use std::time::Instant;

const TOKEN_GUIDANCE: [&str; 5] = [
    "To configure camera images to upload you must go to Prusa Connect and",
    "add one or more \"other cameras\" and be ready to copy and paste the",
    "'token' for each camera for this setup. Use the camera tab at",
    "https://connect.prusa3d.com/ and look for \"Add new other camera\" near",
    "the bottom, ignore the \"web camera\" section that has QR codes",
];

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The operator chose save. `saved` is false if the final write failed;
    /// the failure was shown but does not change the exit status.
    Completed { saved: bool },
    /// The operator chose exit-without-saving.
    Discarded,
    /// Nothing useful could be configured.
    Aborted { reason: String },
}

impl SessionOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionOutcome::Completed { .. } => 0,
            SessionOutcome::Discarded | SessionOutcome::Aborted { .. } => 1,
        }
    }
}

/// Edit-loop menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Save,
    Exit,
}

/// Maps menu input to an action. Remove is only offered for a non-empty
/// list; anything unrecognised is `None`.
pub fn parse_menu_choice(input: &str, list_is_empty: bool) -> Option<MenuChoice> {
    match input.trim().to_uppercase().as_str() {
        "A" => Some(MenuChoice::Add),
        "R" if !list_is_empty => Some(MenuChoice::Remove),
        "S" => Some(MenuChoice::Save),
        "X" => Some(MenuChoice::Exit),
        _ => None,
    }
}

pub struct SetupSession<C: Console, D: DeviceDirectory> {
    console: C,
    directory: D,
    obfuscate_credentials: bool,
}

impl<C: Console, D: DeviceDirectory> SetupSession<C, D> {
    pub fn new(console: C, directory: D, obfuscate_credentials: bool) -> Self {
        SetupSession { console, directory, obfuscate_credentials }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Runs the whole session. Operator-input failures are returned as
    /// errors; every other fatal condition becomes [`SessionOutcome::Aborted`]
    /// after its message has been shown.
    pub async fn run(&mut self, default_settings_path: Option<&str>) -> Result<SessionOutcome, AppError> {
        let session_start = Instant::now();

        // INIT
        let settings_path = store::resolve_path(&mut self.console, default_settings_path)?;
        let store = SettingsStore::new(settings_path);
        let mut settings = store.load();
        info!("🚀 Setup session started for '{}'", store.path().display());

        // CREDENTIAL_RESOLUTION
        let existing = self.resolve_stored_credential(&settings)?;

        // DEVICE_DISCOVERY
        let discovery = match self.directory.authenticate_and_discover(existing, &mut self.console).await {
            Ok(discovery) => discovery,
            Err(AppError::Input(details)) => return Err(AppError::Input(details)),
            Err(e) => {
                error!("❌ Device discovery failed: {}", e);
                return Ok(self.abort(format!("Unable to list Blink cameras: {}", e)));
            }
        };
        if discovery.devices.is_empty() {
            warn!("⚠️ Blink account '{}' has no cameras", discovery.credential.username);
            return Ok(self.abort("No Blink cameras were found for this account.".to_string()));
        }

        // CONFIRM_DEVICES
        self.console.say("");
        for (n, device) in discovery.devices.iter().enumerate() {
            self.console.say(&format!("    {} - {} sn={}", n + 1, device.name, device.id));
        }
        if !console::ask_yes_no(&mut self.console, "\nDoes this list of cameras look correct?")? {
            return Ok(self.abort("Camera list rejected.".to_string()));
        }

        // Checkpoint: keep the (possibly new) credentials even if the edit is abandoned.
        settings = codec::encode_credentials(settings, &discovery.credential, self.obfuscate_credentials)?;
        settings.username = Some(discovery.credential.username.clone());
        if let Err(e) = store.save(&settings) {
            warn!("⚠️ Checkpoint save failed: {}", e);
            self.console.say(&format!("SAVE ERROR: {}", e));
            if !console::ask_yes_no(&mut self.console, "\nContinue?")? {
                return Ok(self.abort("Settings could not be saved.".to_string()));
            }
        }

        self.console.say("");
        for line in TOKEN_GUIDANCE {
            self.console.say(line);
        }

        // EDIT_LOOP
        let choice = self.edit_bindings(&mut settings, &discovery.devices)?;

        let outcome = match choice {
            MenuChoice::Save => match store.save(&settings) {
                Ok(()) => {
                    self.console.say("");
                    self.console.say("Settings saved");
                    SessionOutcome::Completed { saved: true }
                }
                Err(e) => {
                    error!("❌ Final save failed: {}", e);
                    self.console.say("");
                    self.console.say(&e.to_string());
                    SessionOutcome::Completed { saved: false }
                }
            },
            _ => {
                self.console.say("");
                self.console.say("Program terminated");
                SessionOutcome::Discarded
            }
        };
        info!("🏁 Setup session finished with {:?} in {:?}", outcome, session_start.elapsed());
        Ok(outcome)
    }

    fn resolve_stored_credential(&mut self, settings: &SettingsDocument) -> Result<Option<Credential>, AppError> {
        match codec::decode_credentials(settings) {
            Some(credential) => {
                let question = format!(
                    "\nBlink app credentials exist for {}, should they be used?",
                    credential.username
                );
                if console::ask_yes_no(&mut self.console, &question)? {
                    debug!("Operator reused stored credentials for '{}'", credential.username);
                    Ok(Some(credential))
                } else {
                    self.console.say("\nEnter new Blink app credentials:\n");
                    Ok(None)
                }
            }
            None => {
                self.console.say("\nEnter Blink app credentials:\n");
                Ok(None)
            }
        }
    }

    /// Runs the edit loop until the operator picks save or exit.
    fn edit_bindings(&mut self, settings: &mut SettingsDocument, devices: &[DeviceCandidate]) -> Result<MenuChoice, AppError> {
        let mut choice = if settings.bindings.is_empty() { Some(MenuChoice::Add) } else { None };
        loop {
            if choice == Some(MenuChoice::Add) {
                settings.bindings.add(devices, &mut self.console)?;
            }

            choice = Some(self.binding_menu(settings)?);
            if let Some(done @ (MenuChoice::Save | MenuChoice::Exit)) = choice {
                return Ok(done);
            }
        }
    }

    /// Shows the list and the action menu; handles Remove in place and
    /// returns Add, Save or Exit.
    fn binding_menu(&mut self, settings: &mut SettingsDocument) -> Result<MenuChoice, AppError> {
        loop {
            let list_is_empty = settings.bindings.is_empty();
            self.console.say("");
            self.console.say("List of cameras to be used for image upload");
            self.console.say("");
            for line in settings.bindings.display(false) {
                self.console.say(&line);
            }

            self.console.say("");
            self.console.say("Choose action:");
            self.console.say("");
            self.console.say("    [ A ] - add camera");
            if !list_is_empty {
                self.console.say("    [ R ] - remove camera");
            }
            self.console.say("    [ S ] - save and exit");
            self.console.say("    [ X ] - exit without saving");

            let answer = console::prompt(&mut self.console, "\nChoice?", Some("S"))?;
            match parse_menu_choice(&answer, list_is_empty) {
                Some(MenuChoice::Remove) => {
                    self.console.say("\nCurrent camera upload list:\n");
                    for line in settings.bindings.display(true) {
                        self.console.say(&line);
                    }
                    let answer = self.console.read_line("\nEnter number of camera to remove: ")?;
                    match answer.trim().parse::<usize>() {
                        Ok(index) => {
                            settings.bindings.remove(index);
                        }
                        Err(_) => debug!("Ignoring non-numeric removal input '{}'", answer),
                    }
                }
                Some(other) => return Ok(other),
                None => debug!("Ignoring menu input '{}'", answer),
            }
        }
    }

    fn abort(&mut self, reason: String) -> SessionOutcome {
        self.console.say("");
        self.console.say(&reason);
        SessionOutcome::Aborted { reason }
    }
}
