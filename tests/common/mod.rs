#![allow(dead_code)]

use async_trait::async_trait;
use blink_connect_setup::camera::device_directory::{DeviceCandidate, DeviceDirectory, Discovery};
use blink_connect_setup::core::console::Console;
use blink_connect_setup::errors::AppError;
use blink_connect_setup::operations::setup_session::SetupSession;
use blink_connect_setup::settings::document::Credential;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Replays canned answers and records a transcript of everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    pub fn mentions(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        self.transcript.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| AppError::Input("operator input stream closed".to_string()))
    }
}

/// Directory stand-in that answers once with a canned result and records
/// the credential it was offered.
pub struct FakeDirectory {
    result: Option<Result<Discovery, AppError>>,
    pub offered: Option<Option<Credential>>,
    pub calls: usize,
}

impl FakeDirectory {
    pub fn with_devices(credential: Credential, devices: &[(&str, &str)]) -> Self {
        let devices = devices.iter().map(|(name, id)| DeviceCandidate::new(*name, *id)).collect();
        FakeDirectory {
            result: Some(Ok(Discovery { credential, devices })),
            offered: None,
            calls: 0,
        }
    }

    pub fn failing(error: AppError) -> Self {
        FakeDirectory { result: Some(Err(error)), offered: None, calls: 0 }
    }
}

#[async_trait]
impl DeviceDirectory for FakeDirectory {
    async fn authenticate_and_discover(
        &mut self,
        existing: Option<Credential>,
        _console: &mut dyn Console,
    ) -> Result<Discovery, AppError> {
        self.calls += 1;
        self.offered = Some(existing);
        self.result
            .take()
            .unwrap_or_else(|| Err(AppError::Discovery("directory asked twice".to_string())))
    }
}

pub fn test_credential(username: &str) -> Credential {
    let mut credential = Credential::for_user(username);
    credential.token = Some("token-1".to_string());
    credential.account_id = Some(11);
    credential.host = Some("rest-u011.immedia-semi.com".to_string());
    credential
}

/// Temp dir plus the settings path inside it (not created).
pub fn settings_location() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("prusa-connect-upload.config");
    (dir, path)
}

pub fn path_answer(path: &Path) -> String {
    path.display().to_string()
}

pub fn session(
    answers: Vec<String>,
    directory: FakeDirectory,
) -> SetupSession<ScriptedConsole, FakeDirectory> {
    SetupSession::new(ScriptedConsole::new(answers), directory, true)
}

pub fn answers(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
