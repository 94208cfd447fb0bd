//! Credential obfuscation for the settings file.
//!
//! Base32 keeps credentials from being readable at a glance in a shared
//! dotfile. It is not encryption.

use crate::errors::AppError;
use crate::settings::document::{Credential, SettingsDocument};
use data_encoding::BASE32;
use log::{debug, warn};
use serde_json::Value;

pub fn obfuscate(plain_text: &str) -> String {
    BASE32.encode(plain_text.as_bytes())
}

pub fn deobfuscate(obfuscated: &str) -> Result<String, AppError> {
    let bytes = BASE32
        .decode(obfuscated.trim().as_bytes())
        .map_err(|e| AppError::Decode(format!("invalid base32 text: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Decode(format!("decoded text is not UTF-8: {}", e)))
}

fn try_decode_credentials(raw: &Value) -> Result<Credential, AppError> {
    let structured = match raw {
        Value::String(obfuscated) => {
            let json_str = deobfuscate(obfuscated)?;
            serde_json::from_str::<Value>(&json_str)
                .map_err(|e| AppError::Decode(format!("credentials are not valid JSON: {}", e)))?
        }
        // Older stores kept the object unobfuscated.
        other => other.clone(),
    };
    serde_json::from_value(structured).map_err(|e| AppError::Decode(format!("credentials are malformed: {}", e)))
}

/// Returns the stored credential, or `None` if it is absent or unreadable.
pub fn decode_credentials(settings: &SettingsDocument) -> Option<Credential> {
    let raw = settings.credentials.as_ref()?;
    match try_decode_credentials(raw) {
        Ok(credential) => {
            debug!("🔑 Decoded stored credentials for '{}'", credential.username);
            Some(credential)
        }
        Err(e) => {
            warn!("⚠️ Ignoring stored credentials: {}", e);
            None
        }
    }
}

/// Stores `credential` into the document, obfuscated or as a raw object.
/// Other fields are left untouched.
pub fn encode_credentials(
    mut settings: SettingsDocument,
    credential: &Credential,
    obfuscate_value: bool,
) -> Result<SettingsDocument, AppError> {
    let encoded = if obfuscate_value {
        let json_str = serde_json::to_string(credential)
            .map_err(|e| AppError::Persist(format!("failed to serialise credentials: {}", e)))?;
        Value::String(obfuscate(&json_str))
    } else {
        serde_json::to_value(credential)
            .map_err(|e| AppError::Persist(format!("failed to serialise credentials: {}", e)))?
    };
    settings.credentials = Some(encoded);
    Ok(settings)
}
