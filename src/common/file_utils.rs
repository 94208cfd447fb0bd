use crate::common::timestamp_utils;
use crate::errors::AppError;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Expands a leading `~` against the user's home directory and anchors
/// relative paths at the current working directory. The path does not
/// have to exist.
pub fn expand_user_path(raw: &str) -> Result<PathBuf, AppError> {
    let raw = raw.trim();
    let expanded = if raw == "~" {
        home_dir()?
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home_dir()?.join(rest)
    } else {
        PathBuf::from(raw)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}

fn home_dir() -> Result<PathBuf, AppError> {
    dirs::home_dir().ok_or_else(|| AppError::Config("Unable to determine the user's home directory".to_string()))
}

pub fn ensure_parent_directory(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Parent directory '{}' does not exist, attempting to create it.", parent.display());
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Io(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Owner-only mode for a settings file that does not exist yet.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o600;

/// Writes `content` to a sibling temp file and renames it over `path`, so a
/// failed write never truncates the previous file. On unix the existing
/// file's mode is carried over; a new file is created owner-only.
pub fn write_atomically(path: &Path, content: &str) -> Result<(), AppError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::Io(format!("'{}' does not name a file", path.display())))?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp_path = dir.join(format!(".{}.tmp.{}", file_name, timestamp_utils::current_utc_nanos()));

    #[cfg(unix)]
    let target_mode = {
        use std::os::unix::fs::PermissionsExt;
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta.permissions().mode() & 0o7777,
            _ => NEW_FILE_MODE,
        }
    };

    let write_result = (|| -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(target_mode))?;
        }

        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(AppError::Io(format!("Failed to write '{}': {}", path.display(), e)));
    }
    debug!("Wrote {} bytes to '{}'", content.len(), path.display());
    Ok(())
}
